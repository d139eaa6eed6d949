//! Highlight ring renderer
//!
//! Owns the raster surface and repaints it from a [`DrawSettings`] and the
//! current click state. Draw order, back to front: glow, expanding ring,
//! outer ring, inner ring.

use super::geometry::{fit_dashes, RoundedSquare};
use super::glow::GlowGeometry;
use super::solid_paint;
use super::style::DrawSettings;
use crate::animation::{color_blend, ClickState, ClickTransform};
use crate::settings::UnitColor;
use tiny_skia::{Color, Pixmap, Stroke, StrokeDash, Transform};

/// How far the ring-expand echo grows at full progress, in pixels.
const EXPAND_DISTANCE: f64 = 16.0;

#[derive(Default)]
pub struct RingRenderer {
    pixmap: Option<Pixmap>,
}

impl RingRenderer {
    pub fn new() -> Self {
        Self { pixmap: None }
    }

    /// Last rendered surface, if any.
    pub fn surface(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Repaint the surface. Without settings there is nothing to draw and
    /// the surface is left untouched.
    pub fn render(
        &mut self,
        settings: Option<&DrawSettings>,
        click: &ClickState,
    ) -> Option<&Pixmap> {
        let settings = settings?;
        let side = settings.canvas_size();
        if side == 0 {
            return None;
        }

        let needs_surface = self
            .pixmap
            .as_ref()
            .map_or(true, |p| p.width() != side || p.height() != side);
        if needs_surface {
            tracing::trace!("Allocating {}x{} ring surface", side, side);
            self.pixmap = Pixmap::new(side, side);
        }
        let pixmap = self.pixmap.as_mut()?;
        pixmap.fill(Color::TRANSPARENT);

        let (color, anim) = click_effects(settings, click);
        let center = side as f64 / 2.0;
        let transform = Transform::from_translate((center + anim.translate_x) as f32, center as f32)
            .pre_scale(anim.scale_x as f32, anim.scale_y as f32)
            .pre_rotate(settings.rotation as f32);

        draw_rings(pixmap, settings, color, &anim, transform);
        Some(pixmap)
    }
}

/// Ring color and geometry adjustments for the current click state.
fn click_effects(settings: &DrawSettings, click: &ClickState) -> (UnitColor, ClickTransform) {
    if !settings.click_animations || !click.is_animating() {
        return (settings.color, ClickTransform::IDENTITY);
    }

    let target = settings.click_color(click.button);
    let color = settings
        .color
        .blend_rgb(target, color_blend(click.progress) as f32);
    let anim = settings
        .click_animation_mode
        .calculate(click.progress, click.button, settings.size);
    (color, anim)
}

fn draw_rings(
    pixmap: &mut Pixmap,
    s: &DrawSettings,
    color: UnitColor,
    anim: &ClickTransform,
    transform: Transform,
) {
    let outer_border = s.border_weight;
    let inner_border = s.border_weight + 1.0;
    let outer_half = s.size / 2.0;
    let inner_half = outer_half - outer_border - s.gap - inner_border / 2.0;
    let outer_radius = s.radius_px;
    let inner_radius = (s.radius_px - outer_border - s.gap).max(0.0);

    s.glow.draw(
        pixmap,
        GlowGeometry {
            outer_half,
            outer_radius,
            border: outer_border,
        },
        color,
        anim.glow_multiplier,
        transform,
    );

    if anim.extra_ring_progress > 0.0 {
        let p = anim.extra_ring_progress;
        let grow = EXPAND_DISTANCE * p;
        let echo = RoundedSquare::new(outer_half - outer_border / 2.0 + grow, outer_radius + grow);
        stroke_outline(pixmap, echo, color, 0.8 * (1.0 - p), outer_border, None, transform);
    }

    let outer = RoundedSquare::new(outer_half - outer_border / 2.0, outer_radius);
    stroke_outline(pixmap, outer, color, 1.0, outer_border, None, transform);

    if inner_half <= 0.0 {
        return;
    }
    let inner = RoundedSquare::new(inner_half, inner_radius);
    let dash = if s.dashed_border {
        fit_dashes(inner.perimeter(), s.dash_gap_size)
            .and_then(|d| StrokeDash::new(vec![d.dash as f32, d.gap as f32], 0.0))
    } else {
        None
    };
    stroke_outline(pixmap, inner, color, s.opacity, inner_border, dash, transform);
}

fn stroke_outline(
    pixmap: &mut Pixmap,
    outline: RoundedSquare,
    color: UnitColor,
    alpha: f64,
    width: f64,
    dash: Option<StrokeDash>,
    transform: Transform,
) {
    if alpha <= 0.0 || width <= 0.0 {
        return;
    }
    let (Some(path), Some(paint)) = (outline.to_path(), solid_paint(color, alpha)) else {
        return;
    };
    let stroke = Stroke {
        width: width as f32,
        dash,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, transform, None);
}
