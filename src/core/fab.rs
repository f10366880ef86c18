//! Follow button visibility, driven by the header transition.
//!
//! The header collapses from [`MotionPosition::Open`] to
//! [`MotionPosition::Closed`] while the list scrolls. The follow button hides
//! once the collapse passes [`HIDE_THRESHOLD`] going forward and shows again
//! once it drops back under [`SHOW_THRESHOLD`] going backward. Between the two
//! thresholds nothing happens, so hovering around the midpoint never flickers.

use tracing::{debug, warn};

/// Progress at or above which a forward transition hides the button.
pub const HIDE_THRESHOLD: f32 = 0.53;
/// Progress at or below which a backward transition shows the button.
pub const SHOW_THRESHOLD: f32 = 0.47;

/// Named endpoints of the header transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPosition {
    Open,
    Closed,
}

/// Events fed by the host driving the transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionEvent {
    Change {
        start: MotionPosition,
        end: MotionPosition,
        progress: f32,
        forward: bool,
    },
    Completed(MotionPosition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FabVisibility {
    #[default]
    Shown,
    Hidden,
    Showing,
    Hiding,
}

impl FabVisibility {
    pub fn is_or_will_be_shown(self) -> bool {
        matches!(self, FabVisibility::Shown | FabVisibility::Showing)
    }

    pub fn is_or_will_be_hidden(self) -> bool {
        matches!(self, FabVisibility::Hidden | FabVisibility::Hiding)
    }

    /// The state reached once any in-flight animation ends.
    pub fn settled(self) -> Self {
        match self {
            FabVisibility::Showing => FabVisibility::Shown,
            FabVisibility::Hiding => FabVisibility::Hidden,
            other => other,
        }
    }
}

/// Side effect the host must apply to the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FabEffect {
    Show,
    Hide,
}

fn show(state: FabVisibility) -> (FabVisibility, Option<FabEffect>) {
    if state.is_or_will_be_shown() {
        (state, None)
    } else {
        (FabVisibility::Showing, Some(FabEffect::Show))
    }
}

fn hide(state: FabVisibility) -> (FabVisibility, Option<FabEffect>) {
    if state.is_or_will_be_hidden() {
        (state, None)
    } else {
        (FabVisibility::Hiding, Some(FabEffect::Hide))
    }
}

/// Pure transition function: `(state, event) -> (state, effect)`.
///
/// `progress` is expected in `[0, 1]`; [`FabController`] sanitizes it before
/// calling in here.
pub fn reduce(state: FabVisibility, event: &TransitionEvent) -> (FabVisibility, Option<FabEffect>) {
    match *event {
        TransitionEvent::Completed(MotionPosition::Open) => show(state),
        TransitionEvent::Completed(MotionPosition::Closed) => hide(state),
        TransitionEvent::Change {
            start: MotionPosition::Open,
            end: MotionPosition::Closed,
            progress,
            forward,
        } => {
            if progress >= HIDE_THRESHOLD && forward {
                hide(state)
            } else if progress <= SHOW_THRESHOLD && !forward {
                show(state)
            } else {
                (state, None)
            }
        }
        TransitionEvent::Change { .. } => (state, None),
    }
}

/// Owns the follow button's visibility and reports when the host must
/// animate it.
#[derive(Debug, Clone, Default)]
pub struct FabController {
    visibility: FabVisibility,
}

impl FabController {
    pub fn new(initial: FabVisibility) -> Self {
        Self {
            visibility: initial,
        }
    }

    pub fn visibility(&self) -> FabVisibility {
        self.visibility
    }

    pub fn on_progress(
        &mut self,
        start: MotionPosition,
        end: MotionPosition,
        progress: f32,
        forward: bool,
    ) -> Option<FabEffect> {
        if progress.is_nan() {
            warn!("Dropping NaN transition progress");
            return None;
        }
        let clamped = progress.clamp(0.0, 1.0);
        if clamped != progress {
            warn!("Transition progress {progress} outside [0, 1], clamped to {clamped}");
        }
        self.on_event(&TransitionEvent::Change {
            start,
            end,
            progress: clamped,
            forward,
        })
    }

    pub fn on_completed(&mut self, end: MotionPosition) -> Option<FabEffect> {
        self.on_event(&TransitionEvent::Completed(end))
    }

    pub fn on_event(&mut self, event: &TransitionEvent) -> Option<FabEffect> {
        if let TransitionEvent::Change {
            start,
            end,
            progress,
            forward,
        } = *event
        {
            if progress.is_nan() || !(0.0..=1.0).contains(&progress) {
                return self.on_progress(start, end, progress, forward);
            }
        }

        let (next, effect) = reduce(self.visibility, event);
        if let Some(effect) = effect {
            debug!(from = ?self.visibility, to = ?next, ?effect, "Follow button visibility changed");
        }
        self.visibility = next;
        effect
    }

    /// Called by the host when the show/hide animation has finished.
    pub fn on_animation_end(&mut self) {
        self.visibility = self.visibility.settled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MotionPosition::{Closed, Open};

    fn collapse(fab: &mut FabController, progress: f32, forward: bool) -> Option<FabEffect> {
        fab.on_progress(Open, Closed, progress, forward)
    }

    #[test]
    fn test_completed_open_shows_once() {
        let mut fab = FabController::new(FabVisibility::Hidden);
        assert_eq!(fab.on_completed(Open), Some(FabEffect::Show));
        assert_eq!(fab.on_completed(Open), None);
        fab.on_animation_end();
        assert_eq!(fab.visibility(), FabVisibility::Shown);
        assert_eq!(fab.on_completed(Open), None);
        assert_eq!(fab.visibility(), FabVisibility::Shown);
    }

    #[test]
    fn test_forward_hides_only_past_threshold() {
        let mut fab = FabController::new(FabVisibility::Shown);
        for p in [0.10, 0.30, 0.52] {
            assert_eq!(collapse(&mut fab, p, true), None);
        }
        assert_eq!(collapse(&mut fab, 0.53, true), Some(FabEffect::Hide));
        for p in [0.60, 0.80] {
            assert_eq!(collapse(&mut fab, p, true), None);
        }
        assert_eq!(fab.visibility(), FabVisibility::Hiding);
    }

    #[test]
    fn test_backward_shows_only_past_threshold() {
        let mut fab = FabController::new(FabVisibility::Shown);
        assert_eq!(collapse(&mut fab, 0.53, true), Some(FabEffect::Hide));

        let mut p = 1.0_f32;
        while p >= 0.48 {
            assert_eq!(collapse(&mut fab, p, false), None, "unexpected effect at {p}");
            p -= 0.01;
        }
        assert_eq!(collapse(&mut fab, 0.47, false), Some(FabEffect::Show));
        assert_eq!(collapse(&mut fab, 0.30, false), None);
        assert_eq!(fab.visibility(), FabVisibility::Showing);
    }

    #[test]
    fn test_completed_closed_overrides_in_flight_show() {
        let mut fab = FabController::new(FabVisibility::Shown);
        collapse(&mut fab, 0.60, true);
        collapse(&mut fab, 0.40, false);
        assert_eq!(fab.visibility(), FabVisibility::Showing);

        assert_eq!(fab.on_completed(Closed), Some(FabEffect::Hide));
        fab.on_animation_end();
        assert_eq!(fab.visibility(), FabVisibility::Hidden);

        let mut hiding = FabController::new(FabVisibility::Hiding);
        assert_eq!(hiding.on_completed(Closed), None);
        hiding.on_animation_end();
        assert_eq!(hiding.visibility(), FabVisibility::Hidden);
    }

    #[test]
    fn test_other_transitions_have_no_effect() {
        let pairs = [(Closed, Open), (Open, Open), (Closed, Closed)];
        for state in [
            FabVisibility::Shown,
            FabVisibility::Hidden,
            FabVisibility::Showing,
            FabVisibility::Hiding,
        ] {
            for (start, end) in pairs {
                let mut fab = FabController::new(state);
                for p in [0.0, 0.2, 0.47, 0.5, 0.53, 0.9, 1.0] {
                    assert_eq!(fab.on_progress(start, end, p, true), None);
                    assert_eq!(fab.on_progress(start, end, p, false), None);
                }
                assert_eq!(fab.visibility(), state);
            }
        }
    }

    #[test]
    fn test_no_repeated_effects_for_any_interleaving() {
        // Deterministic walk over progress, direction, completion and animation ends.
        let mut fab = FabController::new(FabVisibility::Shown);
        let mut last: Option<FabEffect> = None;
        let mut seed: u32 = 0x2545_f491;

        for _ in 0..5_000 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;

            let effect = match seed % 10 {
                0 => fab.on_completed(Open),
                1 => fab.on_completed(Closed),
                2 => {
                    fab.on_animation_end();
                    None
                }
                n => {
                    let progress = (seed >> 8) as f32 / (u32::MAX >> 8) as f32;
                    collapse(&mut fab, progress, n % 2 == 0)
                }
            };

            if let Some(effect) = effect {
                assert_ne!(Some(effect), last, "two consecutive {effect:?} effects");
                last = Some(effect);
            }
        }
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        let mut fab = FabController::new(FabVisibility::Shown);
        assert_eq!(collapse(&mut fab, 1.7, true), Some(FabEffect::Hide));
        assert_eq!(collapse(&mut fab, -0.4, false), Some(FabEffect::Show));
        assert_eq!(collapse(&mut fab, f32::NAN, true), None);
        assert_eq!(fab.visibility(), FabVisibility::Showing);
    }

    #[test]
    fn test_reduce_is_pure() {
        let event = TransitionEvent::Change {
            start: Open,
            end: Closed,
            progress: 0.8,
            forward: true,
        };
        assert_eq!(
            reduce(FabVisibility::Shown, &event),
            (FabVisibility::Hiding, Some(FabEffect::Hide))
        );
        assert_eq!(
            reduce(FabVisibility::Shown, &event),
            (FabVisibility::Hiding, Some(FabEffect::Hide))
        );
    }
}
