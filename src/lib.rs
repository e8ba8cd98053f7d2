//! Snow Dodge - A falling-snowflake dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (snowflakes, player, collisions, lives)
//! - `platform`: Input routing from host events to the simulation
//! - `renderer`: Drawing seam and WebGPU rendering pipeline
//! - `settings`: Persisted tunables
//! - `error`: Startup error taxonomy

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{SettingsError, StartupError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Window dimensions (fixed, not configurable)
    pub const WINDOW_WIDTH: u32 = 800;
    pub const WINDOW_HEIGHT: u32 = 400;

    /// Fixed frame cadence of the host loop (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Snowflake defaults
    pub const SNOWFLAKE_COUNT: usize = 100;
    pub const SNOWFLAKE_DIAMETER: f32 = 10.0;
    pub const SNOWFLAKE_MIN_SPEED: f32 = 1.0;
    pub const SNOWFLAKE_MAX_SPEED: f32 = 3.0;

    /// Player defaults
    pub const PLAYER_STEP: f32 = 5.0;
    /// Gap between the player's feet and the bottom edge at spawn
    pub const PLAYER_MARGIN_BOTTOM: f32 = 10.0;
    /// Where the player is parked once the run ends
    pub const OFFSCREEN: (f32, f32) = (-100.0, -100.0);

    /// Lives
    pub const MAX_LIVES: u8 = 3;

    /// Pointer hide radius (pixels)
    pub const HIDE_RADIUS: f32 = 10.0;

    /// Speed multipliers
    pub const SPEED_NORMAL: f32 = 1.0;
    pub const SPEED_SLOW: f32 = 0.5;
    pub const SPEED_FAST: f32 = 2.0;

    /// HUD heart spacing and top margin
    pub const HEART_SPACING: f32 = 10.0;
    pub const HUD_MARGIN: f32 = 10.0;
}
