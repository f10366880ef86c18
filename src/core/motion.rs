//! Collapsing header transition, driven by the details list scroll offset.

use crate::core::fab::{MotionPosition, TransitionEvent};

/// Changes smaller than this are treated as no movement.
const PROGRESS_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone)]
pub struct HeaderMotion {
    start: MotionPosition,
    end: MotionPosition,
    collapse_distance: f32,
    progress: f32,
    resting: Option<MotionPosition>,
}

impl HeaderMotion {
    pub fn new(collapse_distance: f32) -> Self {
        Self {
            start: MotionPosition::Open,
            end: MotionPosition::Closed,
            collapse_distance,
            progress: 0.0,
            resting: Some(MotionPosition::Open),
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// The endpoint the header currently rests at, if any.
    pub fn position(&self) -> Option<MotionPosition> {
        self.resting
    }

    fn progress_for(&self, offset_y: f32) -> f32 {
        if self.collapse_distance <= 0.0 {
            return if offset_y > 0.0 { 1.0 } else { 0.0 };
        }
        (offset_y / self.collapse_distance).clamp(0.0, 1.0)
    }

    /// Feed the list's absolute vertical offset and collect the resulting
    /// transition events, in the order the host would have dispatched them.
    pub fn on_scroll(&mut self, offset_y: f32) -> Vec<TransitionEvent> {
        if !offset_y.is_finite() {
            return Vec::new();
        }

        let progress = self.progress_for(offset_y);
        if (progress - self.progress).abs() < PROGRESS_EPSILON {
            return Vec::new();
        }

        let forward = progress > self.progress;
        self.progress = progress;

        let mut events = vec![TransitionEvent::Change {
            start: self.start,
            end: self.end,
            progress,
            forward,
        }];

        let arrived = if progress >= 1.0 {
            Some(self.end)
        } else if progress <= 0.0 {
            Some(self.start)
        } else {
            None
        };

        if let Some(position) = arrived
            && arrived != self.resting
        {
            events.push(TransitionEvent::Completed(position));
        }
        self.resting = arrived;

        events
    }
}
