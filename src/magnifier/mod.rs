//! Zoomed viewport that follows the pointer
//!
//! The viewport mirrors the live scene through host clones rather than
//! reading pixels back.

pub mod cloner;
pub mod compositor;
pub mod viewport;

pub use cloner::{CloneLayer, LayerKind, SceneCloner, WINDOW_REBUILD_INTERVAL_MS};
pub use compositor::{MagnifierCompositor, MagnifierPhase};
pub use viewport::{ClipUniforms, Viewport};
