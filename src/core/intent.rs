use crate::core::model::ActionDate;

/// Identifies a rendered element that can take part in a shared transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn poster(show_id: i64) -> Self {
        Self(format!("poster-{show_id}"))
    }

    pub fn episode(episode_id: i64) -> Self {
        Self(format!("episode-{episode_id}"))
    }
}

/// Transition hint: elements on this screen matched by name on the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedElements {
    elements: Vec<(ElementId, String)>,
}

impl SharedElements {
    pub fn add_shared_element(&mut self, element: ElementId, name: &str) {
        self.elements.push((element, name.to_string()));
    }

    pub fn with(mut self, element: ElementId, name: &str) -> Self {
        self.add_shared_element(element, name);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ElementId> {
        self.elements
            .iter()
            .find(|(_, n)| n == name)
            .map(|(element, _)| element)
    }
}

/// A user action forwarded from the screen to the view model.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    ToggleFollow,
    NavigateUp,
    Refresh {
        force: bool,
    },
    MarkSeasonWatched {
        season_id: i64,
        only_aired: bool,
        date: ActionDate,
    },
    MarkSeasonUnwatched(i64),
    ToggleSeasonExpanded(i64),
    MarkSeasonFollowed(i64),
    MarkSeasonIgnored(i64),
    MarkPreviousSeasonsIgnored(i64),
    RelatedShowClicked {
        show_id: i64,
        shared: SharedElements,
    },
    EpisodeClicked {
        episode_id: i64,
    },
}

/// Callbacks raised by the details list, carrying the view that raised them
/// where the original element matters.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    RelatedShowClicked { show_id: i64, view: ElementId },
    EpisodeClicked { episode_id: i64, view: ElementId },
    MarkSeasonWatched {
        season_id: i64,
        only_aired: bool,
        date: ActionDate,
    },
    MarkSeasonUnwatched(i64),
    ToggleSeasonExpanded(i64),
    MarkSeasonFollowed(i64),
    MarkSeasonIgnored(i64),
    MarkPreviousSeasonsIgnored(i64),
}

impl From<ListEvent> for Intent {
    fn from(event: ListEvent) -> Self {
        match event {
            ListEvent::RelatedShowClicked { show_id, view } => Intent::RelatedShowClicked {
                show_id,
                shared: SharedElements::default().with(view, "poster"),
            },
            ListEvent::EpisodeClicked { episode_id, .. } => Intent::EpisodeClicked { episode_id },
            ListEvent::MarkSeasonWatched {
                season_id,
                only_aired,
                date,
            } => Intent::MarkSeasonWatched {
                season_id,
                only_aired,
                date,
            },
            ListEvent::MarkSeasonUnwatched(id) => Intent::MarkSeasonUnwatched(id),
            ListEvent::ToggleSeasonExpanded(id) => Intent::ToggleSeasonExpanded(id),
            ListEvent::MarkSeasonFollowed(id) => Intent::MarkSeasonFollowed(id),
            ListEvent::MarkSeasonIgnored(id) => Intent::MarkSeasonIgnored(id),
            ListEvent::MarkPreviousSeasonsIgnored(id) => Intent::MarkPreviousSeasonsIgnored(id),
        }
    }
}
