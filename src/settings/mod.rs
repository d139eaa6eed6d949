//! Settings snapshot, store seam and color parsing

pub mod color;
pub mod schema;
pub mod store;

pub use color::{hsl_to_rgb, parse_color, Rgba, UnitColor};
pub use schema::{SettingValue, Settings, SettingsKey};
pub use store::{MemoryStore, SettingsStore};

use thiserror::Error;

/// Errors from reading or writing settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Type mismatch for {key}: expected {expected}")]
    TypeMismatch {
        key: &'static str,
        expected: &'static str,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;
