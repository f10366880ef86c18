//! Display strings for the show details screen.

use chrono::{DateTime, Datelike, Utc};

use crate::core::model::{Episode, Season, SeasonWithEpisodes, TvShow};

#[derive(Debug, Clone, Copy, Default)]
pub struct ShowDetailsTextCreator;

impl ShowDetailsTextCreator {
    /// "2014 · AMC · 47 min · TV-14", skipping whatever is unknown.
    pub fn header_subtitle(&self, show: &TvShow) -> String {
        let mut parts = Vec::new();
        if let Some(aired) = show.first_aired {
            parts.push(aired.year().to_string());
        }
        if let Some(network) = &show.network {
            parts.push(network.clone());
        }
        if let Some(runtime) = show.runtime {
            parts.push(format!("{runtime} min"));
        }
        if let Some(certification) = &show.certification {
            parts.push(certification.clone());
        }
        parts.join(" · ")
    }

    pub fn genres(&self, show: &TvShow) -> Option<String> {
        if show.genres.is_empty() {
            None
        } else {
            Some(show.genres.join(", "))
        }
    }

    pub fn rating(&self, show: &TvShow) -> Option<String> {
        show.rating.map(|r| format!("{:.0}%", r * 10.0))
    }

    pub fn season_title(&self, season: &Season) -> String {
        match &season.title {
            Some(title) if !title.is_empty() => title.clone(),
            _ if season.is_specials() => "Specials".to_string(),
            _ => format!("Season {}", season.number),
        }
    }

    /// "3/10 watched · 2 to air".
    pub fn season_summary(&self, season: &SeasonWithEpisodes, now: DateTime<Utc>) -> String {
        let aired = season.aired_count(now);
        let watched = season.watched_aired_count(now);
        let mut summary = format!("{watched}/{aired} watched");
        let to_air = season.to_air_count(now);
        if to_air > 0 {
            summary.push_str(&format!(" · {to_air} to air"));
        }
        summary
    }

    pub fn episode_number(&self, season: &Season, episode: &Episode) -> String {
        format!("S{:02}E{:02}", season.number, episode.number)
    }

    pub fn episode_title(&self, episode: &Episode) -> String {
        episode
            .title
            .clone()
            .unwrap_or_else(|| format!("Episode {}", episode.number))
    }

    pub fn air_date(&self, episode: &Episode, now: DateTime<Utc>) -> String {
        match episode.first_aired {
            Some(aired) if aired <= now => format!("Aired {}", aired.format("%b %-d, %Y")),
            Some(aired) => format!("Airs {}", aired.format("%b %-d, %Y")),
            None => "Air date unknown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::library::Library;
    use crate::core::library::tests::SAMPLE;
    use crate::core::model::EpisodeWithWatch;
    use chrono::{NaiveDate, TimeZone};
    use std::collections::HashSet;

    fn show() -> TvShow {
        TvShow {
            id: 1,
            title: "Halt and Catch Fire".to_string(),
            original_title: None,
            summary: None,
            network: Some("AMC".to_string()),
            certification: Some("TV-14".to_string()),
            runtime: Some(47),
            first_aired: NaiveDate::from_ymd_opt(2014, 6, 1),
            status: None,
            genres: vec!["Drama".to_string(), "Tech".to_string()],
            rating: Some(8.4),
            poster_path: None,
        }
    }

    fn season(number: i32) -> Season {
        Season {
            id: 1,
            show_id: 1,
            number,
            title: None,
            summary: None,
        }
    }

    #[test]
    fn test_header_subtitle() {
        let text = ShowDetailsTextCreator;
        assert_eq!(text.header_subtitle(&show()), "2014 · AMC · 47 min · TV-14");

        let mut bare = show();
        bare.first_aired = None;
        bare.runtime = None;
        bare.certification = None;
        assert_eq!(text.header_subtitle(&bare), "AMC");
        assert_eq!(text.genres(&show()), Some("Drama, Tech".to_string()));
        assert_eq!(text.rating(&show()), Some("84%".to_string()));
    }

    #[test]
    fn test_season_titles() {
        let text = ShowDetailsTextCreator;
        assert_eq!(text.season_title(&season(0)), "Specials");
        assert_eq!(text.season_title(&season(3)), "Season 3");
    }

    #[test]
    fn test_episode_text() {
        let text = ShowDetailsTextCreator;
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let episode = Episode {
            id: 1,
            season_id: 1,
            number: 2,
            title: None,
            summary: None,
            first_aired: Some(Utc.with_ymd_and_hms(2014, 6, 8, 2, 0, 0).unwrap()),
        };
        assert_eq!(text.episode_number(&season(1), &episode), "S01E02");
        assert_eq!(text.episode_title(&episode), "Episode 2");
        assert_eq!(text.air_date(&episode, now), "Aired Jun 8, 2014");

        let summary = SeasonWithEpisodes {
            season: season(1),
            ignored: false,
            episodes: vec![
                EpisodeWithWatch {
                    episode: episode.clone(),
                    watched_at: Some(now),
                },
                EpisodeWithWatch {
                    episode: Episode {
                        first_aired: None,
                        ..episode
                    },
                    watched_at: None,
                },
            ],
        };
        assert_eq!(text.season_summary(&summary, now), "1/1 watched · 1 to air");
    }

    #[test]
    fn test_season_summary_ignores_unaired_watches() {
        let mut library = Library::from_json(SAMPLE).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for id in [301, 302, 303] {
            library.mark_watched(id, now);
        }
        let state = library.snapshot(1, &HashSet::new(), false).unwrap();
        let third = &state.seasons[3];
        assert_eq!(third.watched_count(), 3);
        assert_eq!(
            ShowDetailsTextCreator.season_summary(third, now),
            "1/1 watched · 2 to air"
        );
    }
}
