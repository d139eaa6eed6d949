//! Overlay visibility policies

pub mod auto_hide;

pub use auto_hide::{AutoHideDetector, AutoHideEvent, MOVE_THRESHOLD};
