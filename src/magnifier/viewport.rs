//! Magnifier viewport geometry
//!
//! The viewport fits inside the outer ring's inner edge and shares the
//! ring's corner rounding and rotation.

use crate::settings::Settings;

/// Smallest viewport side in pixels.
pub const MIN_DIAMETER: f64 = 20.0;
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub diameter: f64,
    pub clip_radius: f64,
    /// Degrees; the content group turns the other way.
    pub rotation: f64,
    /// Top-left corner of the viewport in stage coordinates.
    pub x: f64,
    pub y: f64,
}

/// Uniform values for the rounded clip program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipUniforms {
    pub bounds: [f32; 4],
    pub clip_radius: f32,
    pub pixel_step: [f32; 2],
}

impl Viewport {
    /// Viewport centered on `(center_x, center_y)`.
    pub fn compute(settings: &Settings, center_x: f64, center_y: f64) -> Self {
        let outer_half = settings.size as f64 / 2.0;
        let diameter = ((outer_half - settings.border_weight as f64) * 2.0).max(MIN_DIAMETER);
        let clip_radius = (diameter / 2.0 * (settings.corner_radius as f64 / 50.0)).round();

        Self {
            diameter,
            clip_radius,
            rotation: settings.rotation as f64,
            x: center_x - diameter / 2.0,
            y: center_y - diameter / 2.0,
        }
    }

    pub fn clip_uniforms(&self) -> ClipUniforms {
        let d = self.diameter as f32;
        ClipUniforms {
            bounds: [0.0, 0.0, d, d],
            clip_radius: self.clip_radius as f32,
            pixel_step: [1.0 / d, 1.0 / d],
        }
    }

    /// Translation that puts `focus` (stage coordinates) at the viewport
    /// center for content whose source sits at `source_origin`.
    pub fn clone_translation(
        &self,
        focus: (f64, f64),
        source_origin: (f64, f64),
        zoom: f64,
    ) -> (f64, f64) {
        let half = self.diameter / 2.0;
        (
            half - (focus.0 - source_origin.0) * zoom,
            half - (focus.1 - source_origin.1) * zoom,
        )
    }
}

pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport() {
        let v = Viewport::compute(&Settings::default(), 500.0, 300.0);
        assert_eq!(v.diameter, 72.0);
        assert_eq!(v.clip_radius, 36.0);
        assert_eq!((v.x, v.y), (464.0, 264.0));

        let u = v.clip_uniforms();
        assert_eq!(u.bounds, [0.0, 0.0, 72.0, 72.0]);
        assert_eq!(u.clip_radius, 36.0);
        assert!((u.pixel_step[0] - 1.0 / 72.0).abs() < 1e-7);
    }

    #[test]
    fn test_diameter_floor() {
        let settings = Settings {
            size: 40,
            border_weight: 20,
            corner_radius: 25,
            ..Settings::default()
        };
        let v = Viewport::compute(&settings, 0.0, 0.0);
        assert_eq!(v.diameter, MIN_DIAMETER);
        assert_eq!(v.clip_radius, 5.0);
    }

    #[test]
    fn test_focus_lands_at_center() {
        let v = Viewport::compute(&Settings::default(), 0.0, 0.0);
        // Window at (100, 50), pointer over its (20, 10) pixel.
        let (tx, ty) = v.clone_translation((120.0, 60.0), (100.0, 50.0), 2.0);
        assert_eq!((tx, ty), (36.0 - 40.0, 36.0 - 20.0));
        // That pixel maps to tx + 20 * zoom = center.
        assert_eq!(tx + 20.0 * 2.0, 36.0);
    }

    #[test]
    fn test_zoom_clamp() {
        assert_eq!(clamp_zoom(0.5), 1.0);
        assert_eq!(clamp_zoom(9.0), 4.0);
        assert_eq!(clamp_zoom(f64::NAN), 2.0);
        assert_eq!(clamp_zoom(2.5), 2.5);
    }
}
