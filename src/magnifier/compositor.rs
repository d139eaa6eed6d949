//! Magnifier lifecycle
//!
//! Inactive -> Activating -> Active -> Deactivating -> Inactive. Entry and
//! exit are eased by the host; their completion is detected here by
//! accumulating tick time, so teardown after the exit fade happens on the
//! tick that crosses its duration and is skipped entirely when the
//! magnifier was reactivated in the meantime.

use super::cloner::SceneCloner;
use super::viewport::{clamp_zoom, Viewport};
use crate::animation::{Easing, Transition};
use crate::host::program::MAGNIFIER_CLIP;
use crate::host::{Actor, Host, ProgramCache, ProgramId, Stage};
use crate::input::{ActivationKey, KeyDisposition, KeyEvent, KeyEventKind, ModifierMask};
use crate::processing::InertiaSmoother;
use crate::settings::Settings;

const ENTER_MS: u32 = 250;
const EXIT_MS: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MagnifierPhase {
    Inactive,
    Activating { elapsed_ms: f64 },
    Active,
    Deactivating { elapsed_ms: f64 },
}

pub struct MagnifierCompositor {
    phase: MagnifierPhase,
    cloner: SceneCloner,
    program: Option<ProgramId>,
    key_pressed: bool,
    settings: Settings,
}

impl MagnifierCompositor {
    pub fn new(settings: &Settings) -> Self {
        Self {
            phase: MagnifierPhase::Inactive,
            cloner: SceneCloner::new(),
            program: None,
            key_pressed: false,
            settings: settings.clone(),
        }
    }

    pub fn update_constants(&mut self, settings: &Settings) {
        self.settings = settings.clone();
    }

    pub fn phase(&self) -> MagnifierPhase {
        self.phase
    }

    /// True from activation until deactivation is requested.
    pub fn is_active(&self) -> bool {
        matches!(
            self.phase,
            MagnifierPhase::Activating { .. } | MagnifierPhase::Active
        )
    }

    pub fn cloner(&self) -> &SceneCloner {
        &self.cloner
    }

    fn key(&self) -> ActivationKey {
        ActivationKey::parse(&self.settings.magnifier_key)
    }

    pub fn activate<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        smoother: &mut InertiaSmoother,
        programs: &mut ProgramCache,
    ) {
        if !self.settings.magnifier_enabled {
            return;
        }

        match self.phase {
            MagnifierPhase::Activating { .. } => {}
            MagnifierPhase::Active | MagnifierPhase::Deactivating { .. } => {
                // Interrupted exit or repeated request: the clones are still
                // there, just snap back to fully shown.
                if matches!(self.phase, MagnifierPhase::Deactivating { .. }) {
                    tracing::info!("Magnifier reactivated");
                }
                host.remove_all_transitions(Actor::MagnifierGroup);
                host.set_opacity(Actor::MagnifierGroup, 255);
                host.set_scale(Actor::MagnifierGroup, 1.0);
                host.set_visible(Actor::MagnifierGroup, true);
                self.phase = MagnifierPhase::Active;
            }
            MagnifierPhase::Inactive => {
                tracing::info!("Magnifier activated");
                let pointer = host.pointer();
                smoother.reset(pointer.x, pointer.y);

                host.remove_all_transitions(Actor::MagnifierGroup);
                host.set_opacity(Actor::MagnifierGroup, 0);
                host.set_scale(Actor::MagnifierGroup, 0.5);

                self.cloner.init(host);
                self.attach_clip(host, programs);

                host.set_visible(Actor::MagnifierGroup, true);
                host.ease(
                    Actor::MagnifierGroup,
                    &Transition::fade_and_scale(255, 1.0, ENTER_MS, Easing::EaseOutExpo),
                );
                self.phase = MagnifierPhase::Activating { elapsed_ms: 0.0 };
            }
        }
    }

    pub fn deactivate<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        if !self.is_active() {
            return;
        }
        tracing::info!("Magnifier deactivated");
        stage.remove_all_transitions(Actor::MagnifierGroup);
        stage.ease(
            Actor::MagnifierGroup,
            &Transition::fade_and_scale(0, 0.8, EXIT_MS, Easing::EaseInQuart),
        );
        self.phase = MagnifierPhase::Deactivating { elapsed_ms: 0.0 };
    }

    /// Advance the entry/exit clock. Finishing the exit tears down clones
    /// and the clip program and hides the viewport.
    pub fn advance<S: Stage + ?Sized>(&mut self, stage: &mut S, delta_ms: f64) {
        let delta = delta_ms.max(0.0);
        match self.phase {
            MagnifierPhase::Activating { elapsed_ms } => {
                let elapsed_ms = elapsed_ms + delta;
                self.phase = if elapsed_ms >= ENTER_MS as f64 {
                    MagnifierPhase::Active
                } else {
                    MagnifierPhase::Activating { elapsed_ms }
                };
            }
            MagnifierPhase::Deactivating { elapsed_ms } => {
                let elapsed_ms = elapsed_ms + delta;
                if elapsed_ms >= EXIT_MS as f64 {
                    self.teardown(stage);
                } else {
                    self.phase = MagnifierPhase::Deactivating { elapsed_ms };
                }
            }
            MagnifierPhase::Inactive | MagnifierPhase::Active => {}
        }
    }

    /// Follow the modifier mask: held key activates, released deactivates.
    pub fn poll_activation<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        mask: ModifierMask,
        smoother: &mut InertiaSmoother,
        programs: &mut ProgramCache,
    ) {
        if !self.settings.magnifier_enabled {
            self.deactivate(host);
            return;
        }

        let pressed = mask.intersects(self.key().modifier_mask());
        if pressed && !self.is_active() {
            self.activate(host, smoother, programs);
        } else if !pressed && self.is_active() {
            self.deactivate(host);
        }
    }

    /// Edge-triggered activation from captured key events. Only the
    /// configured key is consumed, and only on a state change.
    pub fn handle_key_event<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        event: &KeyEvent,
        smoother: &mut InertiaSmoother,
        programs: &mut ProgramCache,
    ) -> KeyDisposition {
        if !self.settings.magnifier_enabled || event.key != Some(self.key()) {
            return KeyDisposition::PassThrough;
        }

        match event.kind {
            KeyEventKind::Press if !self.key_pressed => {
                self.key_pressed = true;
                self.activate(host, smoother, programs);
                KeyDisposition::Consumed
            }
            KeyEventKind::Release if self.key_pressed => {
                self.key_pressed = false;
                self.deactivate(host);
                KeyDisposition::Consumed
            }
            _ => KeyDisposition::PassThrough,
        }
    }

    /// Per-tick layout of the viewport around the smoothed position.
    pub fn update<H: Host + ?Sized>(&mut self, host: &mut H, delta_ms: f64, x: f64, y: f64) {
        if !self.is_active() {
            return;
        }

        let viewport = Viewport::compute(&self.settings, x, y);
        let d = viewport.diameter;

        host.set_size(Actor::MagnifierGroup, d, d);
        host.set_rotation(Actor::MagnifierGroup, viewport.rotation);
        host.set_size(Actor::MagnifierContent, d, d);
        host.set_rotation(Actor::MagnifierContent, -viewport.rotation);
        host.set_position(Actor::MagnifierGroup, viewport.x, viewport.y);

        if let Some(program) = self.program {
            let clip = viewport.clip_uniforms();
            host.set_uniform(program, "bounds", &clip.bounds);
            host.set_uniform(program, "clipRadius", &[clip.clip_radius]);
            host.set_uniform(program, "pixelStep", &clip.pixel_step);
        }

        let zoom = clamp_zoom(self.settings.magnifier_zoom);
        self.cloner.update(host, delta_ms, &viewport, (x, y), zoom);
    }

    /// Immediate teardown, no exit animation.
    pub fn destroy<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        stage.remove_all_transitions(Actor::MagnifierGroup);
        self.teardown(stage);
        self.key_pressed = false;
    }

    fn attach_clip<S: Stage + ?Sized>(&mut self, stage: &mut S, programs: &mut ProgramCache) {
        if self.program.is_some() {
            return;
        }
        let Some(source) = programs.get(MAGNIFIER_CLIP) else {
            return;
        };
        match stage.attach_program(Actor::MagnifierGroup, source) {
            Ok(id) => self.program = Some(id),
            Err(e) => tracing::warn!("Magnifier clip unavailable, showing unclipped: {}", e),
        }
    }

    fn teardown<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        self.cloner.destroy(stage);
        if let Some(program) = self.program.take() {
            stage.detach_program(Actor::MagnifierGroup, program);
        }
        stage.set_visible(Actor::MagnifierGroup, false);
        self.phase = MagnifierPhase::Inactive;
    }
}
