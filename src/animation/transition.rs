//! Time-based actor transitions
//!
//! The engine never interpolates actor properties itself: it hands a
//! [`Transition`] to the host, whose animation scheduler evaluates it.
//! [`Transition::sample`] is the reference evaluation for hosts without one.

use serde::{Deserialize, Serialize};

/// Easing curves used by the overlay's fades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInQuart,
    EaseOutExpo,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInQuart => t * t * t * t,
            Easing::EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
        }
    }
}

/// Animatable actor properties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorProps {
    pub opacity: u8,
    pub scale: f64,
}

impl Default for ActorProps {
    fn default() -> Self {
        Self {
            opacity: 255,
            scale: 1.0,
        }
    }
}

/// Ease opacity and/or uniform scale to a target over `duration_ms`.
///
/// Scale transitions pivot on the actor's center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub opacity: Option<u8>,
    pub scale: Option<f64>,
    pub duration_ms: u32,
    pub easing: Easing,
}

impl Transition {
    pub fn fade(opacity: u8, duration_ms: u32, easing: Easing) -> Self {
        Self {
            opacity: Some(opacity),
            scale: None,
            duration_ms,
            easing,
        }
    }

    pub fn fade_and_scale(opacity: u8, scale: f64, duration_ms: u32, easing: Easing) -> Self {
        Self {
            opacity: Some(opacity),
            scale: Some(scale),
            duration_ms,
            easing,
        }
    }

    /// Properties `elapsed_ms` into the transition, starting from `from`.
    pub fn sample(&self, from: ActorProps, elapsed_ms: f64) -> ActorProps {
        let t = if self.duration_ms == 0 {
            1.0
        } else {
            elapsed_ms / self.duration_ms as f64
        };
        let k = self.easing.apply(t);

        let opacity = match self.opacity {
            Some(target) => {
                let v = from.opacity as f64 + (target as f64 - from.opacity as f64) * k;
                v.round().clamp(0.0, 255.0) as u8
            }
            None => from.opacity,
        };
        let scale = match self.scale {
            Some(target) => from.scale + (target - from.scale) * k,
            None => from.scale,
        };

        ActorProps { opacity, scale }
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms as f64
    }
}
