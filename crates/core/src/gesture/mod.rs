//! Swipe tracking for the slide viewport.

use serde::{Deserialize, Serialize};

/// Drag tracking state. Autoplay on/off lives on the controller, not here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GestureState {
    #[default]
    Idle,
    Dragging { start_x: f64 },
}

/// What a finished drag commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeOutcome {
    Previous,
    Next,
    SnapBack,
}

impl GestureState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, GestureState::Dragging { .. })
    }

    /// Enters the dragging state. A second start while dragging restarts the
    /// gesture from the new point.
    pub fn begin(&mut self, x: f64) {
        *self = GestureState::Dragging { start_x: x };
    }

    /// Horizontal distance from the drag origin, or `None` while idle.
    pub fn delta(&self, x: f64) -> Option<f64> {
        match *self {
            GestureState::Idle => None,
            GestureState::Dragging { start_x } => Some(x - start_x),
        }
    }

    /// Leaves the dragging state and classifies the swipe.
    ///
    /// A missing end point counts as no movement. Returns `None` while idle.
    pub fn finish(&mut self, end_x: Option<f64>, threshold: f64) -> Option<SwipeOutcome> {
        let GestureState::Dragging { start_x } = *self else {
            return None;
        };
        *self = GestureState::Idle;

        let delta = end_x.map_or(0.0, |x| x - start_x);
        Some(classify_swipe(delta, threshold))
    }
}

/// Rightward swipes reveal the previous slide, leftward the next one.
pub fn classify_swipe(delta: f64, threshold: f64) -> SwipeOutcome {
    if delta > threshold {
        SwipeOutcome::Previous
    } else if delta < -threshold {
        SwipeOutcome::Next
    } else {
        SwipeOutcome::SnapBack
    }
}
