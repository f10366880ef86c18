use tracing::info;

use crate::core::intent::SharedElements;

/// Where the details screen can send the user.
pub trait ShowDetailsNavigator {
    fn show_details(&mut self, show_id: i64, shared: &SharedElements);
    fn episode_details(&mut self, episode_id: i64);
    fn navigate_up(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Show(i64),
    Episode(i64),
}

/// In-app back stack.
#[derive(Debug, Clone, Default)]
pub struct NavStack {
    stack: Vec<Destination>,
    /// Shared elements handed to the most recent show push.
    pending_shared: Option<SharedElements>,
}

impl NavStack {
    pub fn new(root: Destination) -> Self {
        Self {
            stack: vec![root],
            pending_shared: None,
        }
    }

    pub fn current(&self) -> Option<Destination> {
        self.stack.last().copied()
    }

    /// The show screen underneath any episode overlay.
    pub fn current_show(&self) -> Option<i64> {
        self.stack.iter().rev().find_map(|d| match d {
            Destination::Show(id) => Some(*id),
            Destination::Episode(_) => None,
        })
    }

    /// Show ids on the stack, bottom first.
    pub fn shows(&self) -> Vec<i64> {
        self.stack
            .iter()
            .filter_map(|d| match d {
                Destination::Show(id) => Some(*id),
                Destination::Episode(_) => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn take_shared(&mut self) -> Option<SharedElements> {
        self.pending_shared.take()
    }
}

impl ShowDetailsNavigator for NavStack {
    fn show_details(&mut self, show_id: i64, shared: &SharedElements) {
        info!("Navigating to show {show_id}");
        if !shared.is_empty() {
            self.pending_shared = Some(shared.clone());
        }
        self.stack.push(Destination::Show(show_id));
    }

    fn episode_details(&mut self, episode_id: i64) {
        info!("Opening episode {episode_id}");
        self.stack.push(Destination::Episode(episode_id));
    }

    fn navigate_up(&mut self) {
        let popped = self.stack.pop();
        info!("Navigating up from {popped:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::intent::ElementId;

    #[test]
    fn test_back_stack() {
        let mut nav = NavStack::new(Destination::Show(1));
        nav.show_details(2, &SharedElements::default().with(ElementId::poster(2), "poster"));
        nav.episode_details(20);

        assert_eq!(nav.current(), Some(Destination::Episode(20)));
        assert_eq!(nav.current_show(), Some(2));
        assert!(nav.take_shared().is_some());
        assert!(nav.take_shared().is_none());

        nav.navigate_up();
        nav.navigate_up();
        assert_eq!(nav.current(), Some(Destination::Show(1)));
        nav.navigate_up();
        assert!(nav.is_empty());
    }
}
