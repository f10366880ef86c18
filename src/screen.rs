//! One show details screen: binds the view model's snapshot to the UI and
//! drives the follow button from the collapsing header.

use iced::widget::Id;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::core::fab::{
    FabController, FabEffect, FabVisibility, MotionPosition, TransitionEvent,
};
use crate::core::library::Library;
use crate::core::model::ShowDetailsViewState;
use crate::core::motion::HeaderMotion;
use crate::core::view_model::ShowDetailsViewModel;

/// Everything needed to recreate the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arguments {
    pub show_id: i64,
}

/// In-flight show/hide animation of the follow button.
#[derive(Debug, Clone, Copy)]
pub struct FabAnimation {
    effect: FabEffect,
    from_alpha: f32,
    started: Instant,
    duration: Duration,
}

impl FabAnimation {
    fn target(&self) -> f32 {
        match self.effect {
            FabEffect::Show => 1.0,
            FabEffect::Hide => 0.0,
        }
    }

    fn fraction(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn alpha(&self, now: Instant) -> f32 {
        let t = self.fraction(now);
        self.from_alpha + (self.target() - self.from_alpha) * t
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.fraction(now) >= 1.0
    }
}

#[derive(Debug, Clone)]
pub struct ShowDetailsScreen {
    args: Arguments,
    pub view_model: ShowDetailsViewModel,
    fab: FabController,
    motion: HeaderMotion,
    scroll_id: Id,
    scroll_offset: f32,
    fab_animation: Option<FabAnimation>,
    fab_animation_duration: Duration,
    state: Option<ShowDetailsViewState>,
    transitions_started: bool,
}

impl ShowDetailsScreen {
    pub fn create(show_id: i64, config: &AppConfig) -> Self {
        Self {
            args: Arguments { show_id },
            view_model: ShowDetailsViewModel::new(
                show_id,
                Duration::from_secs(config.refresh_interval_secs),
            ),
            fab: FabController::new(FabVisibility::Shown),
            motion: HeaderMotion::new(config.collapse_distance),
            scroll_id: Id::unique(),
            scroll_offset: 0.0,
            fab_animation: None,
            fab_animation_duration: Duration::from_millis(config.fab_animation_ms),
            state: None,
            transitions_started: false,
        }
    }

    pub fn arguments(&self) -> Arguments {
        self.args
    }

    pub fn state(&self) -> Option<&ShowDetailsViewState> {
        self.state.as_ref()
    }

    /// Id of this screen's details list scrollable.
    pub fn scroll_id(&self) -> Id {
        self.scroll_id.clone()
    }

    /// Last vertical offset the list reported; header motion agrees with it.
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn header_progress(&self) -> f32 {
        self.motion.progress()
    }

    /// Whether the header has settled fully collapsed.
    pub fn header_collapsed(&self) -> bool {
        self.motion.position() == Some(MotionPosition::Closed)
    }

    pub fn fab_visibility(&self) -> FabVisibility {
        self.fab.visibility()
    }

    /// Whether the postponed enter transition has started.
    pub fn transitions_started(&self) -> bool {
        self.transitions_started
    }

    /// Re-bind the latest snapshot.
    pub fn invalidate(&mut self, library: &Library) {
        let state = self.view_model.state(library);
        if self.state.is_none() && state.is_some() && !self.transitions_started {
            // First state for this screen: start the postponed enter transition.
            info!("Starting enter transition for show {}", self.args.show_id);
            self.transitions_started = true;
        }
        self.state = state;
    }

    pub fn on_scroll(&mut self, offset_y: f32, now: Instant) -> Vec<FabEffect> {
        if offset_y.is_finite() {
            self.scroll_offset = offset_y.max(0.0);
        }
        let events = self.motion.on_scroll(offset_y);
        self.apply_transition_events(&events, now)
    }

    fn apply_transition_events(
        &mut self,
        events: &[TransitionEvent],
        now: Instant,
    ) -> Vec<FabEffect> {
        let mut effects = Vec::new();
        for event in events {
            if let Some(effect) = self.fab.on_event(event) {
                self.start_fab_animation(effect, now);
                effects.push(effect);
            }
        }
        effects
    }

    fn start_fab_animation(&mut self, effect: FabEffect, now: Instant) {
        let from_alpha = self.fab_alpha(now);
        debug!(?effect, from_alpha, "Animating follow button");
        self.fab_animation = Some(FabAnimation {
            effect,
            from_alpha,
            started: now,
            duration: self.fab_animation_duration,
        });
    }

    pub fn is_animating(&self) -> bool {
        self.fab_animation.is_some()
    }

    /// Advance the follow button animation; settles the controller once done.
    pub fn tick(&mut self, now: Instant) {
        if let Some(animation) = self.fab_animation
            && animation.is_finished(now)
        {
            self.fab_animation = None;
            self.fab.on_animation_end();
        }
    }

    pub fn fab_alpha(&self, now: Instant) -> f32 {
        match self.fab_animation {
            Some(animation) => animation.alpha(now),
            None if self.fab.visibility().is_or_will_be_shown() => 1.0,
            None => 0.0,
        }
    }
}
