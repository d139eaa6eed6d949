//! Click gesture state machine
//!
//! Button edges from the per-tick mask open and close a press animation.
//! Progress rises by a fixed step while a button is held and falls by the
//! same step after release; the gesture ends only once progress is back at
//! exactly zero.

use crate::input::{ModifierMask, PointerButton};
use serde::{Deserialize, Serialize};

/// Per-tick progress increment. Seven ticks for a full press or release.
pub const CLICK_SPEED: f64 = 0.15;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickState {
    pub active: bool,
    pub button: PointerButton,
    /// Always within `[0, 1]`.
    pub progress: f64,
    pub closing: bool,
}

impl ClickState {
    /// True while the renderer should apply click effects.
    pub fn is_animating(&self) -> bool {
        self.active || self.progress > 0.0
    }
}

#[derive(Debug, Clone)]
pub struct ClickAnimator {
    state: Option<ClickState>,
    speed: f64,
}

impl ClickAnimator {
    pub fn new() -> Self {
        Self::with_speed(CLICK_SPEED)
    }

    pub fn with_speed(speed: f64) -> Self {
        let speed = if speed.is_finite() && speed > 0.0 {
            speed.min(1.0)
        } else {
            CLICK_SPEED
        };
        Self { state: None, speed }
    }

    /// Current state; idle until the first press.
    pub fn state(&self) -> ClickState {
        self.state.unwrap_or_default()
    }

    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Advance one tick. Returns true when the visual state changed.
    pub fn update(&mut self, mask: ModifierMask) -> bool {
        let pressed = mask.pressed_button();
        let any_pressed = pressed != PointerButton::None;

        if self.state.is_none() && !any_pressed {
            return false;
        }
        let speed = self.speed;
        let state = self.state.get_or_insert_with(ClickState::default);
        let before = *state;

        if any_pressed && !state.active {
            state.active = true;
            state.button = pressed;
            state.progress = 0.0;
            state.closing = false;
        } else if !any_pressed && state.active && !state.closing {
            state.closing = true;
        } else if any_pressed && state.active && state.closing {
            // Pressed again mid-release: resume rising from where we are.
            state.closing = false;
            state.button = pressed;
        }

        if state.active {
            if !state.closing {
                state.progress = (state.progress + speed).min(1.0);
            } else {
                state.progress = (state.progress - speed).max(0.0);
                if state.progress == 0.0 {
                    state.active = false;
                    state.button = PointerButton::None;
                    state.closing = false;
                }
            }
        }

        *state != before
    }
}

impl Default for ClickAnimator {
    fn default() -> Self {
        Self::new()
    }
}
