//! Spotlight: dim everything except a shape around the pointer
//!
//! A monitor-sized layer carries a mask program. Uniforms are pushed only
//! when their values change. [`mask_alpha`] is the CPU reference for the
//! per-pixel opacity the program computes.

use crate::animation::{Easing, Transition};
use crate::host::program::SPOTLIGHT;
use crate::host::{Actor, Host, ProgramCache, ProgramId, Stage};
use crate::input::{ActivationKey, ModifierMask};
use crate::settings::Settings;
use serde::{Deserialize, Serialize};

const FADE_MS: u32 = 250;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotlightShape {
    #[default]
    Circle,
    Squircle,
    Square,
}

impl SpotlightShape {
    /// Unknown names give a circle.
    pub fn parse(name: &str) -> Self {
        match name {
            "squircle" => SpotlightShape::Squircle,
            "square" => SpotlightShape::Square,
            _ => SpotlightShape::Circle,
        }
    }

    /// Value of the `u_shape` uniform.
    pub fn uniform_value(self) -> f32 {
        match self {
            SpotlightShape::Circle => 0.0,
            SpotlightShape::Squircle => 1.0,
            SpotlightShape::Square => 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotlightUniforms {
    pub pos: [f32; 2],
    pub size: f32,
    pub opacity: f32,
    pub shape: SpotlightShape,
    /// Corner radius for the square shape, pixels.
    pub radius: f32,
    /// Degrees.
    pub rotation: f32,
    pub resolution: [f32; 2],
}

impl SpotlightUniforms {
    fn push<S: Stage + ?Sized>(&self, stage: &mut S, program: ProgramId) {
        stage.set_uniform(program, "u_pos", &self.pos);
        stage.set_uniform(program, "u_size", &[self.size]);
        stage.set_uniform(program, "u_opacity", &[self.opacity]);
        stage.set_uniform(program, "u_shape", &[self.shape.uniform_value()]);
        stage.set_uniform(program, "u_radius", &[self.radius]);
        stage.set_uniform(program, "u_rotation", &[self.rotation]);
        stage.set_uniform(program, "u_resolution", &self.resolution);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpotlightPhase {
    Inactive,
    Active,
    FadingOut { elapsed_ms: f64 },
}

pub struct SpotlightOverlay {
    phase: SpotlightPhase,
    program: Option<ProgramId>,
    pushed: Option<SpotlightUniforms>,
    /// Set when attaching the mask program failed; no retry until the key
    /// is released or the settings change.
    attach_failed: bool,
    settings: Settings,
    x: f64,
    y: f64,
}

impl SpotlightOverlay {
    pub fn new(settings: &Settings) -> Self {
        Self {
            phase: SpotlightPhase::Inactive,
            program: None,
            pushed: None,
            attach_failed: false,
            settings: settings.clone(),
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn update_constants(&mut self, settings: &Settings) {
        self.settings = settings.clone();
        self.attach_failed = false;
    }

    pub fn phase(&self) -> SpotlightPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == SpotlightPhase::Active
    }

    /// Uniform values for the current pointer and settings.
    pub fn uniforms(&self, resolution: (f64, f64)) -> SpotlightUniforms {
        let size = self.settings.spotlight_size as f64;
        SpotlightUniforms {
            pos: [self.x as f32, self.y as f32],
            size: size as f32,
            opacity: self.settings.spotlight_opacity as f32,
            shape: SpotlightShape::parse(&self.settings.shape),
            radius: (self.settings.corner_radius as f64 / 50.0 * size / 2.0) as f32,
            rotation: self.settings.rotation as f32,
            resolution: [resolution.0 as f32, resolution.1 as f32],
        }
    }

    pub fn activate<H: Host + ?Sized>(&mut self, host: &mut H, programs: &mut ProgramCache) {
        match self.phase {
            SpotlightPhase::Active => {}
            SpotlightPhase::FadingOut { .. } => {
                tracing::info!("Spotlight reactivated");
                host.remove_all_transitions(Actor::Spotlight);
                host.ease(Actor::Spotlight, &Transition::fade(255, FADE_MS, Easing::EaseOutQuad));
                self.phase = SpotlightPhase::Active;
            }
            SpotlightPhase::Inactive => {
                if self.attach_failed {
                    return;
                }
                let Some(source) = programs.get(SPOTLIGHT) else {
                    return;
                };
                let program = match host.attach_program(Actor::Spotlight, source) {
                    Ok(id) => id,
                    Err(e) => {
                        tracing::warn!("Spotlight unavailable: {}", e);
                        self.attach_failed = true;
                        return;
                    }
                };
                tracing::info!("Spotlight activated");

                let monitor = host.monitor();
                host.remove_all_transitions(Actor::Spotlight);
                host.set_position(Actor::Spotlight, 0.0, 0.0);
                host.set_size(Actor::Spotlight, monitor.width, monitor.height);
                host.set_opacity(Actor::Spotlight, 0);
                host.set_visible(Actor::Spotlight, true);

                self.program = Some(program);
                self.pushed = None;
                self.phase = SpotlightPhase::Active;
                self.push_uniforms(host);

                host.ease(Actor::Spotlight, &Transition::fade(255, FADE_MS, Easing::EaseOutQuad));
            }
        }
    }

    pub fn deactivate<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        if self.phase != SpotlightPhase::Active {
            return;
        }
        tracing::info!("Spotlight deactivated");
        stage.remove_all_transitions(Actor::Spotlight);
        stage.ease(Actor::Spotlight, &Transition::fade(0, FADE_MS, Easing::EaseOutQuad));
        self.phase = SpotlightPhase::FadingOut { elapsed_ms: 0.0 };
    }

    /// Advance the fade-out clock; the layer goes away once it completes.
    pub fn advance<S: Stage + ?Sized>(&mut self, stage: &mut S, delta_ms: f64) {
        if let SpotlightPhase::FadingOut { elapsed_ms } = self.phase {
            let elapsed_ms = elapsed_ms + delta_ms.max(0.0);
            if elapsed_ms >= FADE_MS as f64 {
                self.teardown(stage);
            } else {
                self.phase = SpotlightPhase::FadingOut { elapsed_ms };
            }
        }
    }

    pub fn poll_activation<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        mask: ModifierMask,
        programs: &mut ProgramCache,
    ) {
        if !self.settings.spotlight_enabled {
            self.deactivate(host);
            return;
        }

        let key = ActivationKey::parse(&self.settings.spotlight_key);
        let pressed = mask.intersects(key.modifier_mask());
        if !pressed {
            self.attach_failed = false;
        }
        if pressed && !self.is_active() {
            self.activate(host, programs);
        } else if !pressed && self.is_active() {
            self.deactivate(host);
        }
    }

    /// Track the pointer; uniforms go out only when something changed.
    pub fn update<H: Host + ?Sized>(&mut self, host: &mut H, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        if self.is_active() {
            self.push_uniforms(host);
        }
    }

    pub fn destroy<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        stage.remove_all_transitions(Actor::Spotlight);
        self.teardown(stage);
    }

    fn push_uniforms<H: Host + ?Sized>(&mut self, host: &mut H) {
        let Some(program) = self.program else {
            return;
        };
        let monitor = host.monitor();
        let uniforms = self.uniforms((monitor.width, monitor.height));
        if self.pushed != Some(uniforms) {
            uniforms.push(host, program);
            self.pushed = Some(uniforms);
        }
    }

    fn teardown<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        if let Some(program) = self.program.take() {
            stage.detach_program(Actor::Spotlight, program);
        }
        stage.set_visible(Actor::Spotlight, false);
        self.pushed = None;
        self.phase = SpotlightPhase::Inactive;
    }
}

/// Opacity of the dimming layer at pixel `(px, py)`: `opacity` outside the
/// shape, zero inside, with a one pixel smooth edge.
pub fn mask_alpha(u: &SpotlightUniforms, px: f32, py: f32) -> f32 {
    let dx = px - u.pos[0];
    let dy = py - u.pos[1];
    let theta = -u.rotation.to_radians();
    let (sin, cos) = theta.sin_cos();
    let x = dx * cos - dy * sin;
    let y = dx * sin + dy * cos;

    let distance = shape_distance(u, x, y);
    u.opacity * smoothstep(-0.5, 0.5, distance)
}

/// Signed distance to the shape outline, negative inside.
fn shape_distance(u: &SpotlightUniforms, x: f32, y: f32) -> f32 {
    let half = u.size / 2.0;
    match u.shape {
        SpotlightShape::Circle => x.hypot(y) - half,
        SpotlightShape::Squircle => {
            let (x2, y2) = (x * x, y * y);
            (x2 * x2 + y2 * y2).powf(0.25) - half
        }
        SpotlightShape::Square => {
            let r = u.radius.clamp(0.0, half);
            let qx = x.abs() - (half - r);
            let qy = y.abs() - (half - r);
            let outside = qx.max(0.0).hypot(qy.max(0.0));
            let inside = qx.max(qy).min(0.0);
            outside + inside - r
        }
    }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
