//! Soft glow behind the outer ring
//!
//! Ten concentric strokes of growing width at low alpha, clipped so nothing
//! lands inside the outer ring's inner edge.

use super::geometry::RoundedSquare;
use super::solid_paint;
use crate::settings::{Settings, UnitColor};
use serde::{Deserialize, Serialize};
use tiny_skia::{BlendMode, FillRule, Mask, PathBuilder, Pixmap, Stroke, Transform};

const GLOW_STEPS: u32 = 10;
/// Padding around the ring when no glow is drawn.
const BASE_PADDING: f64 = 20.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GlowStyle {
    pub enabled: bool,
    pub radius: f64,
    pub spread: f64,
}

/// Outer ring dimensions the glow hugs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowGeometry {
    pub outer_half: f64,
    pub outer_radius: f64,
    pub border: f64,
}

impl GlowStyle {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            enabled: settings.glow,
            radius: settings.glow_radius as f64,
            spread: settings.glow_spread as f64,
        }
    }

    /// A zero radius turns the glow off even when the toggle is on.
    pub fn is_enabled(&self) -> bool {
        self.enabled && self.radius > 0.0
    }

    /// Extra canvas margin on each side of the ring.
    pub fn padding(&self) -> f64 {
        if self.enabled {
            self.radius + self.spread + BASE_PADDING
        } else {
            BASE_PADDING
        }
    }

    pub fn draw(
        &self,
        pixmap: &mut Pixmap,
        geometry: GlowGeometry,
        color: UnitColor,
        multiplier: f64,
        transform: Transform,
    ) {
        if !self.is_enabled() {
            return;
        }

        let GlowGeometry {
            outer_half,
            outer_radius,
            border,
        } = geometry;

        let Some(mask) = outside_mask(pixmap, outer_half - border, outer_radius, transform) else {
            return;
        };
        let Some(ring) = RoundedSquare::new(outer_half - border / 2.0, outer_radius).to_path()
        else {
            return;
        };

        let alpha = (color.a as f64 * 0.5 * multiplier / GLOW_STEPS as f64).min(1.0);
        let Some(paint) = solid_paint(color, alpha) else {
            return;
        };

        let radius = self.radius * multiplier;
        let spread = self.spread * multiplier;
        for i in 0..GLOW_STEPS {
            let stroke = Stroke {
                width: (border + spread + radius * i as f64 / GLOW_STEPS as f64) as f32,
                ..Stroke::default()
            };
            pixmap.stroke_path(&ring, &paint, &stroke, transform, Some(&mask));
        }

        // Wipe whatever bled into the ring's interior.
        let interior = RoundedSquare::new(outer_half - border, (outer_radius - border).max(0.0));
        if let (Some(path), Some(mut clear)) = (interior.to_path(), solid_paint(color, 1.0)) {
            clear.blend_mode = BlendMode::Clear;
            pixmap.fill_path(&path, &clear, FillRule::Winding, transform, None);
        }
    }
}

/// Mask covering everything outside the given rounded square.
fn outside_mask(pixmap: &Pixmap, half: f64, radius: f64, transform: Transform) -> Option<Mask> {
    let mut mask = Mask::new(pixmap.width(), pixmap.height())?;

    // The universe rectangle is in ring space, so make it large enough to
    // cover the canvas under any click scale or rotation.
    let extent = (pixmap.width() + pixmap.height()) as f32 * 2.0;
    let mut pb = PathBuilder::new();
    pb.move_to(-extent, -extent);
    pb.line_to(extent, -extent);
    pb.line_to(extent, extent);
    pb.line_to(-extent, extent);
    pb.close();
    RoundedSquare::new(half, radius).append_to(&mut pb);
    let clip = pb.finish()?;

    mask.fill_path(&clip, FillRule::EvenOdd, true, transform);
    Some(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Rgba;

    fn glow() -> GlowStyle {
        GlowStyle {
            enabled: true,
            radius: 10.0,
            spread: 5.0,
        }
    }

    #[test]
    fn test_enabled_requires_radius() {
        assert!(glow().is_enabled());
        let flat = GlowStyle {
            radius: 0.0,
            ..glow()
        };
        assert!(!flat.is_enabled());
        // Padding follows the toggle alone.
        assert_eq!(flat.padding(), 25.0);
        assert_eq!(GlowStyle::default().padding(), 20.0);
        assert_eq!(glow().padding(), 35.0);
    }

    #[test]
    fn test_glow_lands_outside_ring_only() {
        let mut pixmap = Pixmap::new(150, 150).unwrap();
        let geometry = GlowGeometry {
            outer_half: 40.0,
            outer_radius: 40.0,
            border: 4.0,
        };
        let transform = Transform::from_translate(75.0, 75.0);
        glow().draw(&mut pixmap, geometry, Rgba::FALLBACK.to_unit(), 1.0, transform);

        // Just beyond the outer ring
        assert!(pixmap.pixel(119, 75).unwrap().alpha() > 0);
        // Deep inside
        assert_eq!(pixmap.pixel(75, 75).unwrap().alpha(), 0);
        assert_eq!(pixmap.pixel(95, 75).unwrap().alpha(), 0);
        // Far corner is out of reach
        assert_eq!(pixmap.pixel(0, 0).unwrap().alpha(), 0);
    }

    #[test]
    fn test_disabled_glow_draws_nothing() {
        let mut pixmap = Pixmap::new(64, 64).unwrap();
        let geometry = GlowGeometry {
            outer_half: 20.0,
            outer_radius: 10.0,
            border: 2.0,
        };
        GlowStyle::default().draw(
            &mut pixmap,
            geometry,
            Rgba::FALLBACK.to_unit(),
            2.5,
            Transform::from_translate(32.0, 32.0),
        );
        assert!(pixmap.data().iter().all(|&b| b == 0));
    }
}
