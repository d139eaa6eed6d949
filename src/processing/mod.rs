//! Per-tick signal processing for pointer samples
//!
//! Turns raw pointer positions into the trailing position the highlight is
//! drawn at.

pub mod spring;

pub use spring::{InertiaConfig, InertiaSmoother, SpringState};
