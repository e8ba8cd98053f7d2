//! Error types for Snow Dodge
//!
//! Only startup can fail. Once a `GameLoop` exists, ticks and input
//! callbacks are infallible.

use thiserror::Error;

/// Problems loading or validating `Settings`
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Faults that prevent the game from ever entering `Playing`
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Asset `{name}` unusable: {reason}")]
    Asset { name: &'static str, reason: String },

    #[error("Render error: {0}")]
    Render(String),
}
