//! Click feedback and actor transitions
//!
//! `click` owns the press/release state machine, `variants` maps its
//! progress onto ring transforms, and `transition` describes the fades the
//! host animates.

pub mod click;
pub mod transition;
pub mod variants;

pub use click::{ClickAnimator, ClickState, CLICK_SPEED};
pub use transition::{ActorProps, Easing, Transition};
pub use variants::{color_blend, ClickAnimationMode, ClickTransform};
