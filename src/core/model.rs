use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvShow {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub certification: Option<String>,
    /// Episode runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub first_aired: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: i64,
    pub show_id: i64,
    /// 0 holds specials.
    pub number: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl Season {
    pub fn is_specials(&self) -> bool {
        self.number == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: i64,
    pub season_id: i64,
    pub number: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub first_aired: Option<DateTime<Utc>>,
}

impl Episode {
    pub fn has_aired(&self, now: DateTime<Utc>) -> bool {
        self.first_aired.is_some_and(|aired| aired <= now)
    }
}

/// Which timestamp to record when marking episodes watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionDate {
    Now,
    Aired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeWithWatch {
    pub episode: Episode,
    pub watched_at: Option<DateTime<Utc>>,
}

impl EpisodeWithWatch {
    pub fn is_watched(&self) -> bool {
        self.watched_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonWithEpisodes {
    pub season: Season,
    pub ignored: bool,
    pub episodes: Vec<EpisodeWithWatch>,
}

impl SeasonWithEpisodes {
    pub fn watched_count(&self) -> usize {
        self.episodes.iter().filter(|e| e.is_watched()).count()
    }

    /// Watched episodes that have already aired.
    pub fn watched_aired_count(&self, now: DateTime<Utc>) -> usize {
        self.episodes
            .iter()
            .filter(|e| e.is_watched() && e.episode.has_aired(now))
            .count()
    }

    pub fn aired_count(&self, now: DateTime<Utc>) -> usize {
        self.episodes.iter().filter(|e| e.episode.has_aired(now)).count()
    }

    pub fn to_air_count(&self, now: DateTime<Utc>) -> usize {
        self.episodes.len() - self.aired_count(now)
    }
}

/// Immutable snapshot rendered by the details screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowDetailsViewState {
    pub show: TvShow,
    pub is_followed: bool,
    pub seasons: Vec<SeasonWithEpisodes>,
    pub related: Vec<TvShow>,
    pub expanded_seasons: HashSet<i64>,
    pub refreshing: bool,
}

impl ShowDetailsViewState {
    pub fn is_expanded(&self, season_id: i64) -> bool {
        self.expanded_seasons.contains(&season_id)
    }

    pub fn find_episode(&self, episode_id: i64) -> Option<(&Season, &EpisodeWithWatch)> {
        self.seasons.iter().find_map(|s| {
            s.episodes
                .iter()
                .find(|e| e.episode.id == episode_id)
                .map(|e| (&s.season, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn episode(id: i64, aired: Option<DateTime<Utc>>) -> Episode {
        Episode {
            id,
            season_id: 1,
            number: id as i32,
            title: None,
            summary: None,
            first_aired: aired,
        }
    }

    #[test]
    fn test_season_counts() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let past = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let future = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let season = SeasonWithEpisodes {
            season: Season {
                id: 1,
                show_id: 1,
                number: 1,
                title: None,
                summary: None,
            },
            ignored: false,
            episodes: vec![
                EpisodeWithWatch {
                    episode: episode(1, Some(past)),
                    watched_at: Some(now),
                },
                EpisodeWithWatch {
                    episode: episode(2, Some(future)),
                    watched_at: None,
                },
                EpisodeWithWatch {
                    episode: episode(3, None),
                    watched_at: None,
                },
            ],
        };
        assert_eq!(season.watched_count(), 1);
        assert_eq!(season.aired_count(now), 1);
        assert_eq!(season.to_air_count(now), 2);
    }
}
