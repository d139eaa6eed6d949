//! Idle auto-hide
//!
//! Hides the overlay after the pointer has stayed put for a configurable
//! delay and brings it back on the first real movement. Jitter within a
//! couple of pixels does not count as movement.

use crate::animation::{Easing, Transition};
use crate::host::{Actor, Stage};
use crate::settings::Settings;

/// Movement beyond this many pixels on either axis wakes the overlay.
pub const MOVE_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoHideEvent {
    None,
    Show,
    Hide,
}

impl AutoHideEvent {
    /// Start the matching transition on the overlay container.
    pub fn apply<S: Stage + ?Sized>(self, stage: &mut S) {
        let transition = match self {
            AutoHideEvent::None => return,
            AutoHideEvent::Show => AutoHideDetector::show_transition(),
            AutoHideEvent::Hide => AutoHideDetector::hide_transition(),
        };
        stage.remove_all_transitions(Actor::Overlay);
        stage.ease(Actor::Overlay, &transition);
    }
}

#[derive(Debug, Clone)]
pub struct AutoHideDetector {
    enabled: bool,
    delay_ms: f64,
    hidden: bool,
    last_x: f64,
    last_y: f64,
    stationary_ms: f64,
}

impl AutoHideDetector {
    pub fn new(enabled: bool, delay_ms: f64) -> Self {
        Self {
            enabled,
            delay_ms: delay_ms.max(0.0),
            hidden: false,
            last_x: 0.0,
            last_y: 0.0,
            stationary_ms: 0.0,
        }
    }

    pub fn update_constants(&mut self, settings: &Settings) {
        self.enabled = settings.auto_hide;
        self.delay_ms = settings.auto_hide_delay.max(0) as f64;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Feed one position sample taken `delta_ms` after the previous one.
    pub fn update(&mut self, x: f64, y: f64, delta_ms: f64) -> AutoHideEvent {
        let moved =
            (x - self.last_x).abs() > MOVE_THRESHOLD || (y - self.last_y).abs() > MOVE_THRESHOLD;
        if moved {
            self.last_x = x;
            self.last_y = y;
        }

        if !self.enabled {
            self.stationary_ms = 0.0;
            return self.show();
        }

        if moved {
            self.stationary_ms = 0.0;
            return self.show();
        }

        self.stationary_ms += delta_ms.max(0.0);
        if !self.hidden && self.stationary_ms >= self.delay_ms {
            self.hidden = true;
            tracing::trace!("Pointer idle for {:.0} ms, hiding", self.stationary_ms);
            return AutoHideEvent::Hide;
        }

        AutoHideEvent::None
    }

    /// Back to visible with the idle timer cleared.
    pub fn reset(&mut self) {
        self.hidden = false;
        self.stationary_ms = 0.0;
    }

    /// Reset and snap the overlay container back to fully shown.
    pub fn reset_actor<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        self.reset();
        stage.remove_all_transitions(Actor::Overlay);
        stage.set_opacity(Actor::Overlay, 255);
        stage.set_scale(Actor::Overlay, 1.0);
    }

    pub fn hide_transition() -> Transition {
        Transition::fade_and_scale(0, 0.3, 200, Easing::EaseInQuad)
    }

    pub fn show_transition() -> Transition {
        Transition::fade_and_scale(255, 1.0, 150, Easing::EaseOutQuad)
    }

    fn show(&mut self) -> AutoHideEvent {
        if self.hidden {
            self.hidden = false;
            AutoHideEvent::Show
        } else {
            AutoHideEvent::None
        }
    }
}

impl Default for AutoHideDetector {
    fn default() -> Self {
        let settings = Settings::default();
        Self::new(settings.auto_hide, settings.auto_hide_delay as f64)
    }
}
