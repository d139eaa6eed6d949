//! Draw settings derived from a settings snapshot

use super::glow::GlowStyle;
use crate::animation::ClickAnimationMode;
use crate::input::PointerButton;
use crate::settings::color::accent_color;
use crate::settings::{Rgba, Settings, UnitColor};

/// Everything the ring renderer needs for one repaint.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawSettings {
    pub size: f64,
    pub border_weight: f64,
    pub gap: f64,
    pub color: UnitColor,
    /// Corner radius of the outer ring in pixels.
    pub radius_px: f64,
    /// Alpha of the inner ring.
    pub opacity: f64,
    /// Degrees.
    pub rotation: f64,
    pub glow: GlowStyle,
    pub click_animations: bool,
    pub click_animation_mode: ClickAnimationMode,
    pub dashed_border: bool,
    pub dash_gap_size: f64,
    pub left_click_color: UnitColor,
    pub right_click_color: UnitColor,
}

impl DrawSettings {
    /// `accent` is the host's accent color name, consulted only when
    /// `use-system-accent` is on.
    pub fn build(settings: &Settings, accent: Option<&str>) -> Self {
        let size = settings.size as f64;
        let radius_px = (size / 2.0 * (settings.corner_radius as f64 / 50.0)).round();

        Self {
            size,
            border_weight: settings.border_weight as f64,
            gap: settings.gap,
            color: ring_color(settings, accent).to_unit(),
            radius_px,
            opacity: settings.opacity,
            rotation: settings.rotation as f64,
            glow: GlowStyle::from_settings(settings),
            click_animations: settings.click_animations,
            click_animation_mode: ClickAnimationMode::parse(&settings.click_animation_mode),
            dashed_border: settings.dashed_border,
            dash_gap_size: settings.dash_gap_size,
            left_click_color: Rgba::parse_or_default(&settings.left_click_color).to_unit(),
            right_click_color: Rgba::parse_or_default(&settings.right_click_color).to_unit(),
        }
    }

    /// Side length of the square drawing surface.
    pub fn canvas_size(&self) -> u32 {
        canvas_size(self.size, &self.glow)
    }

    pub fn click_color(&self, button: PointerButton) -> UnitColor {
        match button {
            PointerButton::Right => self.right_click_color,
            _ => self.left_click_color,
        }
    }
}

/// Base ring color, honoring the system accent override.
pub fn ring_color(settings: &Settings, accent: Option<&str>) -> Rgba {
    if settings.use_system_accent {
        if let Some(color) = accent.and_then(accent_color) {
            return color;
        }
    }
    Rgba::parse_or_default(&settings.color)
}

pub fn canvas_size(size: f64, glow: &GlowStyle) -> u32 {
    let side = size + glow.padding() * 2.0;
    if side.is_finite() && side > 0.0 {
        side.ceil() as u32
    } else {
        0
    }
}
