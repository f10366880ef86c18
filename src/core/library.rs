//! Local show library.
//!
//! The library file holds catalog data (shows, seasons, episodes, related
//! shows) and seed user state (followed shows, watched episodes, ignored
//! seasons). Catalog data is replaced on every refresh; user state lives in
//! memory for the session and is never written back.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::model::{
    Episode, EpisodeWithWatch, Season, SeasonWithEpisodes, ShowDetailsViewState, TvShow,
};

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("failed to read library {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid library file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("show {0} not found in library")]
    ShowNotFound(i64),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LibraryFile {
    shows: Vec<TvShow>,
    seasons: Vec<Season>,
    episodes: Vec<Episode>,
    related: HashMap<i64, Vec<i64>>,
    followed: Vec<i64>,
    watched: HashMap<i64, DateTime<Utc>>,
    ignored_seasons: Vec<i64>,
}

/// Shows, seasons and episodes as last read from disk.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    shows: HashMap<i64, TvShow>,
    seasons: Vec<Season>,
    episodes: Vec<Episode>,
    related: HashMap<i64, Vec<i64>>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, LibraryError> {
        let file: LibraryFile = serde_json::from_str(json)?;
        Ok(Self::from_file(&file))
    }

    fn from_file(file: &LibraryFile) -> Self {
        let mut seasons = file.seasons.clone();
        seasons.sort_by_key(|s| (s.show_id, s.number));
        let mut episodes = file.episodes.clone();
        episodes.sort_by_key(|e| (e.season_id, e.number));

        Self {
            shows: file.shows.iter().map(|s| (s.id, s.clone())).collect(),
            seasons,
            episodes,
            related: file.related.clone(),
        }
    }

    pub fn show_count(&self) -> usize {
        self.shows.len()
    }
}

#[derive(Debug, Clone, Default)]
struct UserState {
    followed: HashSet<i64>,
    watched: HashMap<i64, DateTime<Utc>>,
    ignored_seasons: HashSet<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct Library {
    catalog: Catalog,
    user: UserState,
}

impl Library {
    pub fn from_json(json: &str) -> Result<Self, LibraryError> {
        let file: LibraryFile = serde_json::from_str(json)?;
        Ok(Self {
            catalog: Catalog::from_file(&file),
            user: UserState {
                followed: file.followed.into_iter().collect(),
                watched: file.watched,
                ignored_seasons: file.ignored_seasons.into_iter().collect(),
            },
        })
    }

    /// Swap in freshly loaded catalog data, keeping the session's user state.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        debug!("Replacing catalog with {} shows", catalog.show_count());
        self.catalog = catalog;
    }

    pub fn show(&self, show_id: i64) -> Option<&TvShow> {
        self.catalog.shows.get(&show_id)
    }

    pub fn season(&self, season_id: i64) -> Option<&Season> {
        self.catalog.seasons.iter().find(|s| s.id == season_id)
    }

    /// Seasons of a show, ordered by number.
    pub fn seasons_for(&self, show_id: i64) -> impl Iterator<Item = &Season> {
        self.catalog.seasons.iter().filter(move |s| s.show_id == show_id)
    }

    /// Episodes of a season, ordered by number.
    pub fn episodes_for(&self, season_id: i64) -> impl Iterator<Item = &Episode> {
        self.catalog
            .episodes
            .iter()
            .filter(move |e| e.season_id == season_id)
    }

    pub fn is_followed(&self, show_id: i64) -> bool {
        self.user.followed.contains(&show_id)
    }

    pub fn set_followed(&mut self, show_id: i64, followed: bool) {
        if followed {
            self.user.followed.insert(show_id);
        } else {
            self.user.followed.remove(&show_id);
        }
    }

    pub fn watched_at(&self, episode_id: i64) -> Option<DateTime<Utc>> {
        self.user.watched.get(&episode_id).copied()
    }

    pub fn mark_watched(&mut self, episode_id: i64, at: DateTime<Utc>) {
        self.user.watched.insert(episode_id, at);
    }

    pub fn mark_unwatched(&mut self, episode_id: i64) {
        self.user.watched.remove(&episode_id);
    }

    pub fn is_season_ignored(&self, season_id: i64) -> bool {
        self.user.ignored_seasons.contains(&season_id)
    }

    pub fn set_season_ignored(&mut self, season_id: i64, ignored: bool) {
        if ignored {
            self.user.ignored_seasons.insert(season_id);
        } else {
            self.user.ignored_seasons.remove(&season_id);
        }
    }

    pub fn snapshot(
        &self,
        show_id: i64,
        expanded_seasons: &HashSet<i64>,
        refreshing: bool,
    ) -> Result<ShowDetailsViewState, LibraryError> {
        let show = self
            .show(show_id)
            .cloned()
            .ok_or(LibraryError::ShowNotFound(show_id))?;

        let seasons = self
            .seasons_for(show_id)
            .map(|season| SeasonWithEpisodes {
                season: season.clone(),
                ignored: self.is_season_ignored(season.id),
                episodes: self
                    .episodes_for(season.id)
                    .map(|episode| EpisodeWithWatch {
                        episode: episode.clone(),
                        watched_at: self.watched_at(episode.id),
                    })
                    .collect(),
            })
            .collect();

        let related = self
            .catalog
            .related
            .get(&show_id)
            .map(|ids| ids.iter().filter_map(|id| self.show(*id).cloned()).collect())
            .unwrap_or_default();

        Ok(ShowDetailsViewState {
            show,
            is_followed: self.is_followed(show_id),
            seasons,
            related,
            expanded_seasons: expanded_seasons.clone(),
            refreshing,
        })
    }
}

fn read_error(path: &Path, source: std::io::Error) -> LibraryError {
    LibraryError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read the whole library, seeding user state from the file.
pub fn load_library(path: &Path) -> Result<Library, LibraryError> {
    let json = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    let library = Library::from_json(&json)?;
    info!(
        "Library loaded from {} ({} shows)",
        path.display(),
        library.catalog.show_count()
    );
    Ok(library)
}

/// Re-read only the catalog part of the library file.
pub async fn load_catalog(path: PathBuf) -> Result<Catalog, LibraryError> {
    let json = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| read_error(&path, e))?;
    Catalog::from_json(&json)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"{
        "shows": [
            {"id": 1, "title": "Halt and Catch Fire", "network": "AMC", "runtime": 47,
             "first_aired": "2014-06-01", "genres": ["Drama"], "rating": 8.4},
            {"id": 2, "title": "Mr. Robot", "network": "USA Network"},
            {"id": 3, "title": "Silicon Valley"}
        ],
        "seasons": [
            {"id": 12, "show_id": 1, "number": 2},
            {"id": 10, "show_id": 1, "number": 0},
            {"id": 11, "show_id": 1, "number": 1},
            {"id": 13, "show_id": 1, "number": 3}
        ],
        "episodes": [
            {"id": 102, "season_id": 11, "number": 2, "first_aired": "2014-06-08T02:00:00Z"},
            {"id": 101, "season_id": 11, "number": 1, "first_aired": "2014-06-01T02:00:00Z"},
            {"id": 201, "season_id": 12, "number": 1, "first_aired": "2015-05-31T02:00:00Z"},
            {"id": 301, "season_id": 13, "number": 1, "first_aired": "2016-08-23T02:00:00Z"},
            {"id": 302, "season_id": 13, "number": 2, "first_aired": "2099-01-01T00:00:00Z"},
            {"id": 303, "season_id": 13, "number": 3}
        ],
        "related": {"1": [2, 3, 99]},
        "followed": [2],
        "watched": {"101": "2020-01-01T00:00:00Z"},
        "ignored_seasons": [10]
    }"#;

    #[test]
    fn test_snapshot_orders_seasons_and_episodes() {
        let library = Library::from_json(SAMPLE).unwrap();
        let state = library.snapshot(1, &HashSet::new(), false).unwrap();

        let numbers: Vec<i32> = state.seasons.iter().map(|s| s.season.number).collect();
        assert_eq!(numbers, vec![0, 1, 2, 3]);
        let first: Vec<i64> = state.seasons[1].episodes.iter().map(|e| e.episode.id).collect();
        assert_eq!(first, vec![101, 102]);
        assert!(state.seasons[0].ignored);
        assert!(state.seasons[1].episodes[0].is_watched());
        assert!(!state.is_followed);
    }

    #[test]
    fn test_related_skips_unknown_shows() {
        let library = Library::from_json(SAMPLE).unwrap();
        let state = library.snapshot(1, &HashSet::new(), false).unwrap();
        let ids: Vec<i64> = state.related.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_missing_show() {
        let library = Library::from_json(SAMPLE).unwrap();
        assert!(matches!(
            library.snapshot(42, &HashSet::new(), false),
            Err(LibraryError::ShowNotFound(42))
        ));
    }

    #[test]
    fn test_replace_catalog_keeps_user_state() {
        let mut library = Library::from_json(SAMPLE).unwrap();
        library.set_followed(1, true);
        library.mark_watched(201, Utc::now());

        library.replace_catalog(Catalog::from_json(SAMPLE).unwrap());
        assert!(library.is_followed(1));
        assert!(library.watched_at(201).is_some());
        assert!(library.watched_at(101).is_some());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Library::from_json("{\"shows\": 3}"),
            Err(LibraryError::Parse(_))
        ));
    }
}
