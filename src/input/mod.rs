//! Pointer and keyboard input as seen by the overlay
//!
//! The host samples the pointer once per tick and forwards captured key
//! events; everything here is plain data.

pub mod types;

pub use types::{
    ActivationKey, KeyDisposition, KeyEvent, KeyEventKind, ModifierMask, PointerButton,
    PointerSample,
};
