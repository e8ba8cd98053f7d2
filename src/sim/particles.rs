//! Falling snowflake population
//!
//! A fixed number of slots, created once. Slots are never added or removed:
//! a snowflake leaving the screen is respawned in place, and a hidden one
//! stays in its slot.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{SNOWFLAKE_MAX_SPEED, SNOWFLAKE_MIN_SPEED};

/// A single snowflake. Identity is its slot index in the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per tick at 1.0x speed
    pub fall_speed: f32,
    /// Hidden snowflakes are not drawn, moved, or collided
    pub hidden: bool,
}

/// Owns every snowflake and the RNG that places them
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    rng: Pcg32,
}

impl ParticleField {
    /// Populate `count` snowflakes scattered above the visible area
    pub fn new(count: usize, screen_width: f32, screen_height: f32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = (0..count)
            .map(|_| {
                let pos = random_spawn(&mut rng, screen_width, screen_height);
                Particle {
                    pos,
                    fall_speed: rng.random_range(SNOWFLAKE_MIN_SPEED..SNOWFLAKE_MAX_SPEED),
                    hidden: false,
                }
            })
            .collect();

        Self {
            particles,
            width: screen_width,
            height: screen_height,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// All slots, hidden or not, in slot order
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Visible snowflakes with their slot index, in ascending slot order
    pub fn visible(&self) -> impl Iterator<Item = (usize, &Particle)> + '_ {
        self.particles.iter().enumerate().filter(|(_, p)| !p.hidden)
    }

    /// Fall every visible snowflake; anything past the bottom edge respawns
    pub fn advance(&mut self, speed_multiplier: f32) {
        let (width, height) = (self.width, self.height);
        for particle in self.particles.iter_mut().filter(|p| !p.hidden) {
            particle.pos.y += particle.fall_speed * speed_multiplier;
            if particle.pos.y > height {
                particle.pos = random_spawn(&mut self.rng, width, height);
            }
        }
    }

    /// Move one snowflake back above the screen. Speed and visibility are kept.
    pub fn respawn(&mut self, index: usize) {
        let pos = random_spawn(&mut self.rng, self.width, self.height);
        if let Some(particle) = self.particles.get_mut(index) {
            particle.pos = pos;
        }
    }

    /// Idempotent
    pub fn hide(&mut self, index: usize) {
        if let Some(particle) = self.particles.get_mut(index) {
            particle.hidden = true;
        }
    }

    pub fn hide_all(&mut self) {
        for particle in &mut self.particles {
            particle.hidden = true;
        }
    }

    /// Hide every visible snowflake strictly closer than `radius` to `point`.
    /// Returns how many were hidden.
    pub fn hide_near(&mut self, point: Vec2, radius: f32) -> usize {
        let mut hidden = 0;
        for particle in self.particles.iter_mut().filter(|p| !p.hidden) {
            if particle.pos.distance(point) < radius {
                particle.hidden = true;
                hidden += 1;
            }
        }
        hidden
    }

    /// Teleport a snowflake (deterministic test setups)
    pub fn debug_place(&mut self, index: usize, pos: Vec2) {
        if let Some(particle) = self.particles.get_mut(index) {
            particle.pos = pos;
        }
    }
}

/// x in [0, width), y in [-height, 0)
fn random_spawn(rng: &mut Pcg32, width: f32, height: f32) -> Vec2 {
    // Draw order (x then y) is part of the deterministic schedule
    let x = rng.random_range(0.0..width);
    let y = rng.random_range(-height..0.0);
    Vec2::new(x, y)
}
