//! Host compositor seam
//!
//! Everything the engine needs from the desktop: pointer sampling, scene
//! content to mirror, and a handful of actor operations. The engine only
//! ever holds ids; the host owns every actor, clone and program.

pub mod program;
#[cfg(test)]
pub mod testing;

pub use program::{
    BuiltinShaderLoader, FileShaderLoader, ProgramCache, ProgramError, ShaderLoader, ShaderSource,
};

use crate::animation::Transition;
use crate::input::PointerSample;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur in host operations
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("Clone failed: {0}")]
    CloneFailed(String),

    #[error("Program unavailable: {0}")]
    ProgramUnavailable(String),
}

/// Result type for host operations
pub type HostResult<T> = Result<T, HostError>;

/// A live scene surface (background, window, panel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

/// A mirror of a surface inside the magnifier content group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CloneId(pub u64);

/// A mask program attached to an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramId(pub u64);

/// Actors the engine drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    /// Container holding the ring surface.
    Overlay,
    /// Magnifier viewport; carries the rounded clip program.
    MagnifierGroup,
    /// Child of the viewport holding the clones, counter-rotated.
    MagnifierContent,
    /// Full-monitor dimming layer.
    Spotlight,
}

/// A window on the active workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowInfo {
    pub surface: SurfaceId,
    /// Position in the window stack; higher is on top.
    pub stacking: i32,
    pub minimized: bool,
    pub hidden: bool,
    /// Whether the window's surface is currently shown.
    pub visible: bool,
}

impl WindowInfo {
    pub fn is_clonable(&self) -> bool {
        self.visible && !self.minimized && !self.hidden
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonitorGeometry {
    pub width: f64,
    pub height: f64,
}

/// Where a new clone goes among the content group's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClonePlacement {
    /// Insert at this child index; later children shift up.
    At(usize),
    /// Append above everything.
    Top,
}

/// Pointer sampling.
pub trait PointerSource {
    /// Position in stage coordinates plus the modifier/button mask.
    fn pointer(&self) -> PointerSample;
}

/// Read access to the scene being mirrored.
pub trait SceneSource {
    fn background(&self) -> HostResult<SurfaceId>;

    /// Top panel, if the desktop has one.
    fn panel(&self) -> Option<SurfaceId>;

    /// Windows of the active workspace, in no particular order.
    fn windows(&self) -> HostResult<Vec<WindowInfo>>;

    /// Current stage position of a surface. `None` once it is gone.
    fn surface_origin(&self, surface: SurfaceId) -> Option<(f64, f64)>;

    fn monitor(&self) -> MonitorGeometry;

    /// Desktop accent color name (`"blue"`, `"teal"`...).
    fn accent_color(&self) -> Option<String> {
        None
    }
}

/// Actor, clone and program operations.
///
/// Starting a transition on an actor does not cancel earlier ones; callers
/// clear them with [`Stage::remove_all_transitions`] first. Scale changes
/// pivot on the actor's center.
pub trait Stage {
    fn set_position(&mut self, actor: Actor, x: f64, y: f64);

    fn set_size(&mut self, actor: Actor, width: f64, height: f64);

    /// Z-axis rotation in degrees around the actor's center.
    fn set_rotation(&mut self, actor: Actor, degrees: f64);

    fn set_opacity(&mut self, actor: Actor, opacity: u8);

    fn set_scale(&mut self, actor: Actor, scale: f64);

    fn set_visible(&mut self, actor: Actor, visible: bool);

    fn remove_all_transitions(&mut self, actor: Actor);

    fn ease(&mut self, actor: Actor, transition: &Transition);

    /// Ask for the overlay surface to be redrawn on the next frame.
    fn queue_repaint(&mut self);

    fn create_clone(&mut self, source: SurfaceId, placement: ClonePlacement) -> HostResult<CloneId>;

    fn destroy_clone(&mut self, clone: CloneId);

    fn set_clone_transform(
        &mut self,
        clone: CloneId,
        scale: f64,
        translate_x: f64,
        translate_y: f64,
    );

    fn attach_program(&mut self, actor: Actor, source: &ShaderSource) -> HostResult<ProgramId>;

    fn detach_program(&mut self, actor: Actor, program: ProgramId);

    fn set_uniform(&mut self, program: ProgramId, name: &str, values: &[f32]);
}

/// Everything the engine talks to.
pub trait Host: PointerSource + SceneSource + Stage {}

impl<T: PointerSource + SceneSource + Stage + ?Sized> Host for T {}
