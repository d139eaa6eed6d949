//! Typed settings snapshot
//!
//! Mirrors the keys of the extension's settings schema. The snapshot is what
//! every component reads its constants from; the store that owns the values
//! lives behind [`super::store::SettingsStore`].

use super::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full settings snapshot. Keys are kebab-case on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    pub enabled: bool,

    // Appearance
    pub size: i32,
    pub border_weight: i32,
    pub gap: f64,
    pub corner_radius: i32,
    pub rotation: i32,
    pub opacity: f64,
    pub shape: String,
    pub color: String,
    pub use_system_accent: bool,
    pub rgb_enabled: bool,
    pub rgb_speed: f64,

    // Glow and border styling
    pub glow: bool,
    pub glow_radius: i32,
    pub glow_spread: i32,
    pub dashed_border: bool,
    pub dash_gap_size: f64,

    // Click feedback
    pub click_animations: bool,
    pub click_animation_mode: String,
    pub left_click_color: String,
    pub right_click_color: String,

    // Physics
    pub inertia_enabled: bool,
    pub inertia_stiffness: f64,
    pub inertia_smoothness: f64,

    // Idle
    pub auto_hide: bool,
    /// Milliseconds of stillness before the overlay hides.
    pub auto_hide_delay: i32,

    // Magnifier
    pub magnifier_enabled: bool,
    pub magnifier_zoom: f64,
    pub magnifier_key: String,

    // Spotlight
    pub spotlight_enabled: bool,
    pub spotlight_key: String,
    pub spotlight_opacity: f64,
    pub spotlight_size: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 80,
            border_weight: 4,
            gap: 2.0,
            corner_radius: 50,
            rotation: 0,
            opacity: 0.7,
            shape: "circle".to_string(),
            color: "rgba(99, 162, 255, 0.7)".to_string(),
            use_system_accent: false,
            rgb_enabled: false,
            rgb_speed: 2.0,
            glow: false,
            glow_radius: 10,
            glow_spread: 5,
            dashed_border: false,
            dash_gap_size: 4.0,
            click_animations: true,
            click_animation_mode: "directional".to_string(),
            left_click_color: "rgba(255, 107, 107, 1.0)".to_string(),
            right_click_color: "rgba(107, 203, 119, 1.0)".to_string(),
            inertia_enabled: true,
            inertia_stiffness: 0.12,
            inertia_smoothness: 0.65,
            auto_hide: false,
            auto_hide_delay: 2000,
            magnifier_enabled: false,
            magnifier_zoom: 2.0,
            magnifier_key: "Shift_L".to_string(),
            spotlight_enabled: false,
            spotlight_key: "Control_L".to_string(),
            spotlight_opacity: 0.7,
            spotlight_size: 200,
        }
    }
}

/// A single typed setting value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i32),
    Double(f64),
    Str(String),
}

macro_rules! settings_keys {
    ($( $variant:ident => $field:ident : $kind:ident = $name:literal ),* $(,)?) => {
        /// Every key of the settings schema.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum SettingsKey {
            $($variant),*
        }

        impl SettingsKey {
            pub const ALL: &'static [SettingsKey] = &[$(SettingsKey::$variant),*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(SettingsKey::$variant => $name),*
                }
            }

            pub fn parse(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(SettingsKey::$variant),)*
                    _ => None,
                }
            }

            fn kind(self) -> &'static str {
                match self {
                    $(SettingsKey::$variant => stringify!($kind)),*
                }
            }
        }

        impl Settings {
            pub fn get(&self, key: SettingsKey) -> SettingValue {
                match key {
                    $(SettingsKey::$variant => SettingValue::$kind(self.$field.clone())),*
                }
            }

            /// Write one key. The value must have the key's type.
            pub fn set(&mut self, key: SettingsKey, value: SettingValue) -> SettingsResult<()> {
                match (key, value) {
                    $((SettingsKey::$variant, SettingValue::$kind(v)) => self.$field = v,)*
                    (key, _) => {
                        return Err(SettingsError::TypeMismatch {
                            key: key.as_str(),
                            expected: key.kind(),
                        })
                    }
                }
                Ok(())
            }
        }
    };
}

settings_keys! {
    Enabled => enabled: Bool = "enabled",
    Size => size: Int = "size",
    BorderWeight => border_weight: Int = "border-weight",
    Gap => gap: Double = "gap",
    CornerRadius => corner_radius: Int = "corner-radius",
    Rotation => rotation: Int = "rotation",
    Opacity => opacity: Double = "opacity",
    Shape => shape: Str = "shape",
    Color => color: Str = "color",
    UseSystemAccent => use_system_accent: Bool = "use-system-accent",
    RgbEnabled => rgb_enabled: Bool = "rgb-enabled",
    RgbSpeed => rgb_speed: Double = "rgb-speed",
    Glow => glow: Bool = "glow",
    GlowRadius => glow_radius: Int = "glow-radius",
    GlowSpread => glow_spread: Int = "glow-spread",
    DashedBorder => dashed_border: Bool = "dashed-border",
    DashGapSize => dash_gap_size: Double = "dash-gap-size",
    ClickAnimations => click_animations: Bool = "click-animations",
    ClickAnimationMode => click_animation_mode: Str = "click-animation-mode",
    LeftClickColor => left_click_color: Str = "left-click-color",
    RightClickColor => right_click_color: Str = "right-click-color",
    InertiaEnabled => inertia_enabled: Bool = "inertia-enabled",
    InertiaStiffness => inertia_stiffness: Double = "inertia-stiffness",
    InertiaSmoothness => inertia_smoothness: Double = "inertia-smoothness",
    AutoHide => auto_hide: Bool = "auto-hide",
    AutoHideDelay => auto_hide_delay: Int = "auto-hide-delay",
    MagnifierEnabled => magnifier_enabled: Bool = "magnifier-enabled",
    MagnifierZoom => magnifier_zoom: Double = "magnifier-zoom",
    MagnifierKey => magnifier_key: Str = "magnifier-key",
    SpotlightEnabled => spotlight_enabled: Bool = "spotlight-enabled",
    SpotlightKey => spotlight_key: Str = "spotlight-key",
    SpotlightOpacity => spotlight_opacity: Double = "spotlight-opacity",
    SpotlightSize => spotlight_size: Int = "spotlight-size",
}

impl std::fmt::Display for SettingsKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

impl Settings {
    /// Parse a JSON document; missing keys take their defaults.
    pub fn from_json_str(json: &str) -> SettingsResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Read a JSON settings file.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&content)?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Copy with every numeric value forced into its documented range.
    /// Non-finite doubles take their default.
    pub fn sanitized(&self) -> Self {
        let d = Settings::default();
        let mut s = self.clone();

        s.size = s.size.clamp(40, 200);
        s.border_weight = s.border_weight.clamp(1, 20);
        s.gap = finite_or(s.gap, d.gap).clamp(0.0, 20.0);
        s.corner_radius = s.corner_radius.clamp(0, 50);
        s.rotation = s.rotation.clamp(0, 360);
        s.opacity = finite_or(s.opacity, d.opacity).clamp(0.0, 1.0);
        s.rgb_speed = finite_or(s.rgb_speed, d.rgb_speed).clamp(0.1, 10.0);
        s.glow_radius = s.glow_radius.clamp(0, 100);
        s.glow_spread = s.glow_spread.clamp(0, 100);
        s.dash_gap_size = finite_or(s.dash_gap_size, d.dash_gap_size).max(0.0);
        s.inertia_stiffness = finite_or(s.inertia_stiffness, d.inertia_stiffness).clamp(0.01, 1.0);
        s.inertia_smoothness =
            finite_or(s.inertia_smoothness, d.inertia_smoothness).clamp(0.01, 0.99);
        s.auto_hide_delay = s.auto_hide_delay.max(0);
        s.magnifier_zoom = finite_or(s.magnifier_zoom, d.magnifier_zoom).clamp(1.0, 4.0);
        s.spotlight_opacity = finite_or(s.spotlight_opacity, d.spotlight_opacity).clamp(0.1, 1.0);
        s.spotlight_size = s.spotlight_size.clamp(50, 500);

        s
    }

    /// Keys whose values differ between `self` and `other`.
    pub fn diff(&self, other: &Settings) -> Vec<SettingsKey> {
        SettingsKey::ALL
            .iter()
            .copied()
            .filter(|key| self.get(*key) != other.get(*key))
            .collect()
    }
}
