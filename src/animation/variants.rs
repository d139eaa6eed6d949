//! Click animation variants
//!
//! Each variant is a pure function of press progress. None of them keep
//! state, so they are plain enum arms rather than trait objects.

use crate::input::PointerButton;
use serde::{Deserialize, Serialize};

/// Geometry and glow adjustments applied while a button is held.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub glow_multiplier: f64,
    /// Progress of the auxiliary expanding ring, 0 when unused.
    pub extra_ring_progress: f64,
}

impl ClickTransform {
    pub const IDENTITY: ClickTransform = ClickTransform {
        scale_x: 1.0,
        scale_y: 1.0,
        translate_x: 0.0,
        glow_multiplier: 1.0,
        extra_ring_progress: 0.0,
    };
}

impl Default for ClickTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClickAnimationMode {
    /// Squeeze toward the clicked side.
    #[default]
    Directional,
    /// Squeeze toward the center.
    Ripple,
    /// Grow slightly.
    Pulse,
    /// Intensify the glow.
    GlowBurst,
    /// Emit an expanding, fading ring.
    RingExpand,
}

impl ClickAnimationMode {
    /// Parse a mode name; unknown names select the default variant.
    pub fn parse(name: &str) -> Self {
        match name {
            "directional" => ClickAnimationMode::Directional,
            "ripple" => ClickAnimationMode::Ripple,
            "pulse" => ClickAnimationMode::Pulse,
            "glow-burst" => ClickAnimationMode::GlowBurst,
            "ring-expand" => ClickAnimationMode::RingExpand,
            other => {
                tracing::debug!("Unknown click animation mode {:?}, using directional", other);
                ClickAnimationMode::default()
            }
        }
    }

    pub fn calculate(self, progress: f64, button: PointerButton, size: f64) -> ClickTransform {
        let p = progress.clamp(0.0, 1.0);
        match self {
            ClickAnimationMode::Ripple => {
                let scale = 1.0 - p * 0.2;
                ClickTransform {
                    scale_x: scale,
                    scale_y: scale,
                    ..ClickTransform::IDENTITY
                }
            }
            ClickAnimationMode::Directional => {
                // Shifting by half the lost width keeps the opposite edge fixed.
                let shift = (size * 0.3 / 2.0) * p;
                let translate_x = match button {
                    PointerButton::Right => shift,
                    _ => -shift,
                };
                ClickTransform {
                    scale_x: 1.0 - p * 0.3,
                    translate_x,
                    ..ClickTransform::IDENTITY
                }
            }
            ClickAnimationMode::Pulse => {
                let scale = 1.0 + p * 0.15;
                ClickTransform {
                    scale_x: scale,
                    scale_y: scale,
                    ..ClickTransform::IDENTITY
                }
            }
            ClickAnimationMode::GlowBurst => ClickTransform {
                glow_multiplier: 1.0 + p * 1.5,
                ..ClickTransform::IDENTITY
            },
            ClickAnimationMode::RingExpand => ClickTransform {
                extra_ring_progress: p,
                ..ClickTransform::IDENTITY
            },
        }
    }
}

/// Amount the ring color moves toward the click color at `progress`.
pub fn color_blend(progress: f64) -> f64 {
    (progress * 0.8).clamp(0.0, 1.0)
}
