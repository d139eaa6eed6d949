//! Raster rendering of the highlight ring
//!
//! Drawing goes through tiny-skia into a premultiplied RGBA pixmap that the
//! host uploads as the overlay's content.

pub mod geometry;
pub mod glow;
pub mod ring;
pub mod style;

pub use geometry::{fit_dashes, DashPattern, RoundedSquare};
pub use glow::{GlowGeometry, GlowStyle};
pub use ring::RingRenderer;
pub use style::DrawSettings;

use crate::settings::UnitColor;
use tiny_skia::{Color, Paint};

/// Anti-aliased solid paint with the color's RGB and the given alpha.
pub(crate) fn solid_paint(color: UnitColor, alpha: f64) -> Option<Paint<'static>> {
    let alpha = alpha.clamp(0.0, 1.0) as f32;
    let mut paint = Paint::default();
    paint.set_color(Color::from_rgba(color.r, color.g, color.b, alpha)?);
    paint.anti_alias = true;
    Some(paint)
}
