//! Inertia physics for the trailing highlight
//!
//! A discrete spring evaluated once per frame tick: the displacement to the
//! pointer accelerates the highlight, and the damping factor bleeds velocity
//! every tick so the motion always settles.

use crate::settings::Settings;
use serde::{Deserialize, Serialize};

/// Per-tick spring constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InertiaConfig {
    pub enabled: bool,
    /// Fraction of the displacement added to velocity each tick, `(0, 1]`.
    pub stiffness: f64,
    /// Velocity retained each tick, `[0.01, 0.99]`.
    pub damping: f64,
}

impl InertiaConfig {
    pub const DEFAULT_STIFFNESS: f64 = 0.12;
    pub const DEFAULT_DAMPING: f64 = 0.65;

    pub fn new(enabled: bool, stiffness: f64, damping: f64) -> Self {
        Self {
            enabled,
            stiffness,
            damping,
        }
        .clamped()
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.inertia_enabled,
            settings.inertia_stiffness,
            settings.inertia_smoothness,
        )
    }

    /// Keep the integration convergent: damping strictly below 1, stiffness
    /// positive and at most 1.
    fn clamped(self) -> Self {
        let stiffness = if self.stiffness.is_finite() {
            self.stiffness.clamp(0.01, 1.0)
        } else {
            Self::DEFAULT_STIFFNESS
        };
        let damping = if self.damping.is_finite() {
            self.damping.clamp(0.01, 0.99)
        } else {
            Self::DEFAULT_DAMPING
        };
        Self {
            enabled: self.enabled,
            stiffness,
            damping,
        }
    }
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self::new(true, Self::DEFAULT_STIFFNESS, Self::DEFAULT_DAMPING)
    }
}

/// 1D spring state tracking position and velocity
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpringState {
    pub position: f64,
    pub velocity: f64,
}

impl SpringState {
    /// Create a new spring state at the given position with zero velocity
    pub fn new(initial: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
        }
    }

    /// Advance one tick toward the target
    pub fn step(&mut self, target: f64, config: &InertiaConfig) {
        let acceleration = (target - self.position) * config.stiffness;
        self.velocity = (self.velocity + acceleration) * config.damping;
        self.position += self.velocity;
    }

    /// Check if spring has settled (velocity and displacement below threshold)
    pub fn is_settled(&self, target: f64, threshold: f64) -> bool {
        (self.position - target).abs() < threshold && self.velocity.abs() < threshold
    }
}

/// Smoothed pointer position, updated once per tick.
///
/// A state exactly at the origin is treated as "never updated": the next
/// [`InertiaSmoother::update`] snaps to its target instead of flying in
/// from `(0, 0)`.
#[derive(Debug, Clone)]
pub struct InertiaSmoother {
    pub x: SpringState,
    pub y: SpringState,
    config: InertiaConfig,
}

impl InertiaSmoother {
    pub fn new(config: InertiaConfig) -> Self {
        Self {
            x: SpringState::default(),
            y: SpringState::default(),
            config,
        }
    }

    pub fn config(&self) -> &InertiaConfig {
        &self.config
    }

    /// Re-read inertia constants after a settings change.
    pub fn update_constants(&mut self, settings: &Settings) {
        self.config = InertiaConfig::from_settings(settings);
    }

    /// Feed one pointer sample and return the smoothed position.
    pub fn update(&mut self, target_x: f64, target_y: f64) -> (f64, f64) {
        if self.x.position == 0.0 && self.y.position == 0.0 {
            self.reset(target_x, target_y);
            return self.position();
        }

        if self.config.enabled {
            self.x.step(target_x, &self.config);
            self.y.step(target_y, &self.config);
        } else {
            self.reset(target_x, target_y);
        }

        self.position()
    }

    /// Get the current smoothed position
    pub fn position(&self) -> (f64, f64) {
        (self.x.position, self.y.position)
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.x.velocity, self.y.velocity)
    }

    /// Jump to a position with zero velocity (no blending)
    pub fn reset(&mut self, x: f64, y: f64) {
        self.x = SpringState::new(x);
        self.y = SpringState::new(y);
    }

    /// Check if both axes have settled
    pub fn is_settled(&self, target_x: f64, target_y: f64, threshold: f64) -> bool {
        self.x.is_settled(target_x, threshold) && self.y.is_settled(target_y, threshold)
    }
}

impl Default for InertiaSmoother {
    fn default() -> Self {
        Self::new(InertiaConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primed(config: InertiaConfig, x: f64, y: f64) -> InertiaSmoother {
        let mut smoother = InertiaSmoother::new(config);
        smoother.update(x, y);
        smoother
    }

    #[test]
    fn test_first_update_snaps() {
        let mut smoother = InertiaSmoother::default();
        assert_eq!(smoother.update(640.0, 360.0), (640.0, 360.0));
        assert_eq!(smoother.velocity(), (0.0, 0.0));
    }

    #[test]
    fn test_trails_then_approaches_target() {
        let mut smoother = primed(InertiaConfig::default(), 100.0, 100.0);

        let (x, _) = smoother.update(200.0, 100.0);
        assert!(x > 100.0 && x < 200.0, "first step {} should trail", x);

        for _ in 0..120 {
            smoother.update(200.0, 100.0);
        }
        assert!(smoother.is_settled(200.0, 100.0, 0.01));
    }

    #[test]
    fn test_converges_across_constant_grid() {
        for &stiffness in &[0.05, 0.12, 0.5, 1.0] {
            for &damping in &[0.3, 0.65, 0.9, 0.99] {
                let mut smoother = primed(InertiaConfig::new(true, stiffness, damping), 10.0, 10.0);
                let mut errors = Vec::new();
                for _ in 0..5000 {
                    let (x, _) = smoother.update(500.0, 10.0);
                    errors.push((x - 500.0).abs());
                }

                let tail = &errors[4000..];
                assert!(
                    tail.iter().all(|e| *e < 0.5),
                    "k={} d={} did not settle: {}",
                    stiffness,
                    damping,
                    tail[tail.len() - 1]
                );
                let late_max = tail.iter().cloned().fold(0.0, f64::max);
                let early_max = errors[..100].iter().cloned().fold(0.0, f64::max);
                assert!(late_max <= early_max);
            }
        }
    }

    #[test]
    fn test_damping_is_clamped() {
        let config = InertiaConfig::new(true, 5.0, 1.5);
        assert_eq!(config.stiffness, 1.0);
        assert_eq!(config.damping, 0.99);

        let config = InertiaConfig::new(true, f64::NAN, f64::INFINITY);
        assert_eq!(config.stiffness, InertiaConfig::DEFAULT_STIFFNESS);
        assert_eq!(config.damping, InertiaConfig::DEFAULT_DAMPING);
    }

    #[test]
    fn test_disabled_inertia_snaps() {
        let mut smoother = primed(InertiaConfig::new(false, 0.12, 0.65), 10.0, 10.0);
        assert_eq!(smoother.update(300.0, 400.0), (300.0, 400.0));
        assert_eq!(smoother.velocity(), (0.0, 0.0));
    }

    #[test]
    fn test_reset_then_update_is_identity() {
        let mut smoother = primed(InertiaConfig::default(), 0.5, 0.5);
        for _ in 0..10 {
            smoother.update(900.0, 20.0);
        }

        smoother.reset(512.0, 384.0);
        assert_eq!(smoother.update(512.0, 384.0), (512.0, 384.0));
        assert_eq!(smoother.velocity(), (0.0, 0.0));
    }

    #[test]
    fn test_update_constants_from_settings() {
        let mut smoother = InertiaSmoother::default();
        let settings = Settings {
            inertia_enabled: false,
            inertia_smoothness: 2.0,
            ..Settings::default()
        };
        smoother.update_constants(&settings);
        assert!(!smoother.config().enabled);
        assert_eq!(smoother.config().damping, 0.99);
    }
}
