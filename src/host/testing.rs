//! Recording fake host for tests
//!
//! Keeps just enough state to answer questions about what the engine did:
//! actor properties, the clone stack, attached programs and the log of
//! transitions.

use super::*;
use crate::animation::{ActorProps, Transition};
use crate::input::{ModifierMask, PointerSample};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct ActorState {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub props: ActorProps,
    pub visible: bool,
}

impl Default for ActorState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            props: ActorProps::default(),
            visible: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloneState {
    pub source: SurfaceId,
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

pub struct RecordingHost {
    pub pointer: PointerSample,
    pub background: Option<SurfaceId>,
    pub panel: Option<SurfaceId>,
    pub windows: Vec<WindowInfo>,
    pub origins: HashMap<SurfaceId, (f64, f64)>,
    pub monitor: MonitorGeometry,
    pub accent: Option<String>,
    /// Surfaces whose clone creation fails.
    pub broken: HashSet<SurfaceId>,
    /// When false, `attach_program` fails.
    pub programs_available: bool,

    pub actors: HashMap<Actor, ActorState>,
    /// Content group children, bottom to top.
    pub children: Vec<CloneId>,
    pub clones: HashMap<CloneId, CloneState>,
    pub programs: HashMap<ProgramId, Actor>,
    pub uniforms: HashMap<(ProgramId, String), Vec<f32>>,
    pub eases: Vec<(Actor, Transition)>,
    pub repaints: usize,
    pub clones_created: usize,
    pub clones_destroyed: usize,
    pub attach_attempts: usize,
    next_id: u64,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            pointer: PointerSample::new(0.0, 0.0, ModifierMask::NONE),
            background: Some(SurfaceId(1)),
            panel: Some(SurfaceId(2)),
            windows: Vec::new(),
            origins: HashMap::new(),
            monitor: MonitorGeometry {
                width: 1920.0,
                height: 1080.0,
            },
            accent: None,
            broken: HashSet::new(),
            programs_available: true,
            actors: HashMap::new(),
            children: Vec::new(),
            clones: HashMap::new(),
            programs: HashMap::new(),
            uniforms: HashMap::new(),
            eases: Vec::new(),
            repaints: 0,
            clones_created: 0,
            clones_destroyed: 0,
            attach_attempts: 0,
            next_id: 100,
        }
    }

    pub fn add_window(&mut self, id: u64, stacking: i32, origin: (f64, f64)) {
        let surface = SurfaceId(id);
        self.windows.push(WindowInfo {
            surface,
            stacking,
            minimized: false,
            hidden: false,
            visible: true,
        });
        self.origins.insert(surface, origin);
    }

    pub fn set_pointer(&mut self, x: f64, y: f64, mask: ModifierMask) {
        self.pointer = PointerSample::new(x, y, mask);
    }

    pub fn actor(&self, actor: Actor) -> ActorState {
        self.actors.get(&actor).cloned().unwrap_or_default()
    }

    /// Sources of the content group's children, bottom to top.
    pub fn clone_sources(&self) -> Vec<SurfaceId> {
        self.children
            .iter()
            .filter_map(|id| self.clones.get(id).map(|c| c.source))
            .collect()
    }

    pub fn eases_for(&self, actor: Actor) -> Vec<Transition> {
        self.eases
            .iter()
            .filter(|(a, _)| *a == actor)
            .map(|(_, t)| *t)
            .collect()
    }

    pub fn uniform(&self, program: ProgramId, name: &str) -> Option<&[f32]> {
        self.uniforms
            .get(&(program, name.to_string()))
            .map(Vec::as_slice)
    }

    pub fn program_on(&self, actor: Actor) -> Option<ProgramId> {
        self.programs
            .iter()
            .find(|(_, a)| **a == actor)
            .map(|(id, _)| *id)
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn state(&mut self, actor: Actor) -> &mut ActorState {
        self.actors.entry(actor).or_default()
    }
}

impl PointerSource for RecordingHost {
    fn pointer(&self) -> PointerSample {
        self.pointer
    }
}

impl SceneSource for RecordingHost {
    fn background(&self) -> HostResult<SurfaceId> {
        self.background
            .ok_or_else(|| HostError::SurfaceUnavailable("background".into()))
    }

    fn panel(&self) -> Option<SurfaceId> {
        self.panel
    }

    fn windows(&self) -> HostResult<Vec<WindowInfo>> {
        Ok(self.windows.clone())
    }

    fn surface_origin(&self, surface: SurfaceId) -> Option<(f64, f64)> {
        self.origins.get(&surface).copied()
    }

    fn monitor(&self) -> MonitorGeometry {
        self.monitor
    }

    fn accent_color(&self) -> Option<String> {
        self.accent.clone()
    }
}

impl Stage for RecordingHost {
    fn set_position(&mut self, actor: Actor, x: f64, y: f64) {
        let state = self.state(actor);
        state.x = x;
        state.y = y;
    }

    fn set_size(&mut self, actor: Actor, width: f64, height: f64) {
        let state = self.state(actor);
        state.width = width;
        state.height = height;
    }

    fn set_rotation(&mut self, actor: Actor, degrees: f64) {
        self.state(actor).rotation = degrees;
    }

    fn set_opacity(&mut self, actor: Actor, opacity: u8) {
        self.state(actor).props.opacity = opacity;
    }

    fn set_scale(&mut self, actor: Actor, scale: f64) {
        self.state(actor).props.scale = scale;
    }

    fn set_visible(&mut self, actor: Actor, visible: bool) {
        self.state(actor).visible = visible;
    }

    fn remove_all_transitions(&mut self, _actor: Actor) {}

    fn ease(&mut self, actor: Actor, transition: &Transition) {
        self.eases.push((actor, *transition));
    }

    fn queue_repaint(&mut self) {
        self.repaints += 1;
    }

    fn create_clone(
        &mut self,
        source: SurfaceId,
        placement: ClonePlacement,
    ) -> HostResult<CloneId> {
        if self.broken.contains(&source) {
            return Err(HostError::CloneFailed(format!("surface {}", source.0)));
        }
        let id = CloneId(self.next());
        self.clones.insert(
            id,
            CloneState {
                source,
                scale: 1.0,
                translate_x: 0.0,
                translate_y: 0.0,
            },
        );
        match placement {
            ClonePlacement::At(index) => {
                let index = index.min(self.children.len());
                self.children.insert(index, id);
            }
            ClonePlacement::Top => self.children.push(id),
        }
        self.clones_created += 1;
        Ok(id)
    }

    fn destroy_clone(&mut self, clone: CloneId) {
        if self.clones.remove(&clone).is_some() {
            self.clones_destroyed += 1;
        }
        self.children.retain(|c| *c != clone);
    }

    fn set_clone_transform(
        &mut self,
        clone: CloneId,
        scale: f64,
        translate_x: f64,
        translate_y: f64,
    ) {
        if let Some(state) = self.clones.get_mut(&clone) {
            state.scale = scale;
            state.translate_x = translate_x;
            state.translate_y = translate_y;
        }
    }

    fn attach_program(&mut self, actor: Actor, _source: &ShaderSource) -> HostResult<ProgramId> {
        self.attach_attempts += 1;
        if !self.programs_available {
            return Err(HostError::ProgramUnavailable("no GL".into()));
        }
        let id = ProgramId(self.next());
        self.programs.insert(id, actor);
        Ok(id)
    }

    fn detach_program(&mut self, _actor: Actor, program: ProgramId) {
        self.programs.remove(&program);
        self.uniforms.retain(|(id, _), _| *id != program);
    }

    fn set_uniform(&mut self, program: ProgramId, name: &str, values: &[f32]) {
        self.uniforms
            .insert((program, name.to_string()), values.to_vec());
    }
}
