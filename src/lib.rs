//! Hati overlay engine - a cursor highlight that follows the pointer.
//!
//! This crate holds the real-time core: inertia smoothing, click
//! animations, ring and glow rendering, auto-hide, the live magnifier and
//! the spotlight mask. The embedding compositor supplies the scene through
//! the traits in [`host`] and drives [`OverlayEngine::tick`], either from
//! its own frame clock or through [`FrameDriver`].

pub mod animation;
pub mod driver;
pub mod engine;
pub mod host;
pub mod input;
pub mod magnifier;
pub mod processing;
pub mod render;
pub mod settings;
pub mod spotlight;
pub mod visibility;

pub use driver::{FrameDriver, FRAME_PERIOD};
pub use engine::OverlayEngine;
pub use host::{Host, HostError, HostResult};
pub use input::{KeyDisposition, KeyEvent, ModifierMask, PointerSample};
pub use settings::{MemoryStore, Settings, SettingsStore};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hati_overlay=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Hati overlay v{}", env!("CARGO_PKG_VERSION"));
}
