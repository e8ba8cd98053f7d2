//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended (terminal)
    GameOver,
}

/// Held movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Held fall-speed modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedFlag {
    /// Half speed
    Slow,
    /// Double speed (wins over `Slow`)
    Fast,
}

/// Which keys are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub slow: bool,
    pub fast: bool,
}

/// The player sprite's position and held input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub flags: MovementFlags,
}

impl PlayerState {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            flags: MovementFlags::default(),
        }
    }

    /// Spawn position: horizontally centred, resting just above the bottom edge
    pub fn spawn(screen_width: f32, screen_height: f32, sprite_width: f32, sprite_height: f32) -> Self {
        Self::new(Vec2::new(
            screen_width / 2.0 - sprite_width / 2.0,
            screen_height - sprite_height - PLAYER_MARGIN_BOTTOM,
        ))
    }

    pub fn set_direction(&mut self, direction: Direction, active: bool) {
        match direction {
            Direction::Up => self.flags.up = active,
            Direction::Down => self.flags.down = active,
            Direction::Left => self.flags.left = active,
            Direction::Right => self.flags.right = active,
        }
    }

    pub fn set_speed(&mut self, flag: SpeedFlag, active: bool) {
        match flag {
            SpeedFlag::Slow => self.flags.slow = active,
            SpeedFlag::Fast => self.flags.fast = active,
        }
    }

    /// Move by `step` along every held direction. Diagonals are not normalized.
    pub fn integrate(&mut self, step: f32) {
        if self.flags.up {
            self.pos.y -= step;
        }
        if self.flags.down {
            self.pos.y += step;
        }
        if self.flags.left {
            self.pos.x -= step;
        }
        if self.flags.right {
            self.pos.x += step;
        }
    }

    pub fn current_speed_multiplier(&self) -> f32 {
        if self.flags.fast {
            SPEED_FAST
        } else if self.flags.slow {
            SPEED_SLOW
        } else {
            SPEED_NORMAL
        }
    }

    pub fn relocate_offscreen(&mut self) {
        self.pos = Vec2::new(OFFSCREEN.0, OFFSCREEN.1);
    }
}

/// Lives, speed and phase. Owned exclusively by the game loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Player lives (never increases)
    pub lives: u8,
    /// Multiplier applied on the most recent tick
    pub speed_multiplier: f32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(lives: u8) -> Self {
        Self {
            lives: lives.min(MAX_LIVES),
            speed_multiplier: SPEED_NORMAL,
            phase: GamePhase::Playing,
            time_ticks: 0,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Remove one life, clamped at zero. Returns the lives remaining.
    pub fn lose_life(&mut self) -> u8 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(MAX_LIVES)
    }
}
