//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per host frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (by snowflake slot)
//! - Drawing only through the `Canvas` trait

pub mod collision;
pub mod particles;
pub mod state;
pub mod tick;

pub use collision::{Bounds, check};
pub use particles::{Particle, ParticleField};
pub use state::{Direction, GamePhase, GameState, MovementFlags, PlayerState, SpeedFlag};
pub use tick::{GameLoop, TickOutcome};
