use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::core::intent::Intent;
use crate::core::library::{Catalog, Library};
use crate::core::model::{ActionDate, ShowDetailsViewState};
use crate::core::navigator::ShowDetailsNavigator;

/// Work the view model needs the host to run asynchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ReloadLibrary,
}

/// Applies user intents for one show screen.
#[derive(Debug, Clone)]
pub struct ShowDetailsViewModel {
    show_id: i64,
    expanded_seasons: HashSet<i64>,
    refreshing: bool,
    last_refresh: Option<Instant>,
    refresh_interval: Duration,
}

impl ShowDetailsViewModel {
    pub fn new(show_id: i64, refresh_interval: Duration) -> Self {
        Self {
            show_id,
            expanded_seasons: HashSet::new(),
            refreshing: false,
            last_refresh: None,
            refresh_interval,
        }
    }

    pub fn show_id(&self) -> i64 {
        self.show_id
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Current snapshot, or `None` while the show is not in the library.
    pub fn state(&self, library: &Library) -> Option<ShowDetailsViewState> {
        match library.snapshot(self.show_id, &self.expanded_seasons, self.refreshing) {
            Ok(state) => Some(state),
            Err(e) => {
                debug!("No state for show {}: {e}", self.show_id);
                None
            }
        }
    }

    pub fn dispatch(
        &mut self,
        library: &mut Library,
        intent: Intent,
        navigator: &mut dyn ShowDetailsNavigator,
        now: DateTime<Utc>,
    ) -> Option<Effect> {
        debug!(show_id = self.show_id, ?intent, "Dispatching intent");
        match intent {
            Intent::ToggleFollow => {
                let followed = !library.is_followed(self.show_id);
                library.set_followed(self.show_id, followed);
                info!("Show {} followed: {followed}", self.show_id);
                None
            }
            Intent::NavigateUp => {
                navigator.navigate_up();
                None
            }
            Intent::Refresh { force } => self.refresh(force),
            Intent::MarkSeasonWatched {
                season_id,
                only_aired,
                date,
            } => {
                self.mark_season_watched(library, season_id, only_aired, date, now);
                None
            }
            Intent::MarkSeasonUnwatched(season_id) => {
                let ids: Vec<i64> = library.episodes_for(season_id).map(|e| e.id).collect();
                for id in ids {
                    library.mark_unwatched(id);
                }
                None
            }
            Intent::ToggleSeasonExpanded(season_id) => {
                if !self.expanded_seasons.remove(&season_id) {
                    self.expanded_seasons.insert(season_id);
                }
                None
            }
            Intent::MarkSeasonFollowed(season_id) => {
                library.set_season_ignored(season_id, false);
                None
            }
            Intent::MarkSeasonIgnored(season_id) => {
                library.set_season_ignored(season_id, true);
                None
            }
            Intent::MarkPreviousSeasonsIgnored(season_id) => {
                self.ignore_previous_seasons(library, season_id);
                None
            }
            Intent::RelatedShowClicked { show_id, shared } => {
                navigator.show_details(show_id, &shared);
                None
            }
            Intent::EpisodeClicked { episode_id } => {
                navigator.episode_details(episode_id);
                None
            }
        }
    }

    fn refresh(&mut self, force: bool) -> Option<Effect> {
        if self.refreshing {
            debug!("Refresh already running for show {}", self.show_id);
            return None;
        }
        let stale = self
            .last_refresh
            .is_none_or(|at| at.elapsed() >= self.refresh_interval);
        if !force && !stale {
            debug!("Skipping refresh for show {}, data is fresh", self.show_id);
            return None;
        }
        self.refreshing = true;
        Some(Effect::ReloadLibrary)
    }

    fn mark_season_watched(
        &self,
        library: &mut Library,
        season_id: i64,
        only_aired: bool,
        date: ActionDate,
        now: DateTime<Utc>,
    ) {
        let marks: Vec<(i64, DateTime<Utc>)> = library
            .episodes_for(season_id)
            .filter(|e| !only_aired || e.has_aired(now))
            .map(|e| {
                let at = match date {
                    ActionDate::Now => now,
                    ActionDate::Aired => e.first_aired.unwrap_or(now),
                };
                (e.id, at)
            })
            .collect();

        info!("Marking {} episodes of season {season_id} watched", marks.len());
        for (id, at) in marks {
            library.mark_watched(id, at);
        }
    }

    fn ignore_previous_seasons(&self, library: &mut Library, season_id: i64) {
        let Some(number) = library.season(season_id).map(|s| s.number) else {
            warn!("Unknown season {season_id}");
            return;
        };
        let previous: Vec<i64> = library
            .seasons_for(self.show_id)
            .filter(|s| !s.is_specials() && s.number < number)
            .map(|s| s.id)
            .collect();
        for id in previous {
            library.set_season_ignored(id, true);
        }
    }

    /// Apply the outcome of a reload started by [`Effect::ReloadLibrary`].
    pub fn on_reloaded<E>(
        &mut self,
        library: &mut Library,
        result: Result<Catalog, E>,
    ) -> Result<(), E> {
        self.refreshing = false;
        let catalog = result?;
        library.replace_catalog(catalog);
        self.last_refresh = Some(Instant::now());
        Ok(())
    }
}
