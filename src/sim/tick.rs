//! Per-frame simulation tick
//!
//! `GameLoop` owns the player, the snowflakes and the lives counter, and
//! advances them once per host frame in a fixed order:
//! movement, fall speed, snowflake fall, collisions, render.

use glam::Vec2;

use super::collision::{self, Bounds};
use super::particles::ParticleField;
use super::state::{Direction, GamePhase, GameState, PlayerState, SpeedFlag};
use crate::consts::*;
use crate::error::StartupError;
use crate::renderer::{Assets, Canvas, ImageHandle};
use crate::settings::Settings;

/// What the host loop should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking
    Running,
    /// This tick ended the run; the game-over frame was drawn
    GameOver,
    /// Nothing happened, the run had already ended
    Frozen,
}

/// The single game instance
#[derive(Debug, Clone)]
pub struct GameLoop {
    settings: Settings,
    assets: Assets,
    state: GameState,
    player: PlayerState,
    particles: ParticleField,
    screen: Vec2,
}

impl GameLoop {
    /// Build a game for the fixed window, seeded from `settings.seed` or `fallback_seed`
    pub fn new(settings: Settings, fallback_seed: u64) -> Result<Self, StartupError> {
        settings.validate()?;
        let assets = Assets::for_window(WINDOW_WIDTH, WINDOW_HEIGHT)?;
        let seed = settings.seed.unwrap_or(fallback_seed);
        log::info!(
            "New run: seed={}, snowflakes={}, lives={}",
            seed,
            settings.snowflake_count,
            settings.starting_lives
        );
        Ok(Self::with_assets(settings, assets, seed))
    }

    fn with_assets(settings: Settings, assets: Assets, seed: u64) -> Self {
        let screen = Vec2::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32);
        let player = PlayerState::spawn(
            screen.x,
            screen.y,
            assets.player.width as f32,
            assets.player.height as f32,
        );
        let particles = ParticleField::new(settings.snowflake_count, screen.x, screen.y, seed);
        let state = GameState::new(settings.starting_lives);

        Self {
            settings,
            assets,
            state,
            player,
            particles,
            screen,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// The player's hit box at its current position
    pub fn player_bounds(&self) -> Bounds {
        Bounds::new(
            self.player.pos,
            Vec2::new(self.assets.player.width as f32, self.assets.player.height as f32),
        )
    }

    /// Hold or release a movement key. Ignored once the run is over.
    pub fn set_direction(&mut self, direction: Direction, active: bool) {
        if self.is_over() {
            log::trace!("Ignoring {:?} after game over", direction);
            return;
        }
        self.player.set_direction(direction, active);
    }

    /// Hold or release a speed key. Ignored once the run is over.
    pub fn set_speed(&mut self, flag: SpeedFlag, active: bool) {
        if self.is_over() {
            log::trace!("Ignoring {:?} after game over", flag);
            return;
        }
        self.player.set_speed(flag, active);
    }

    /// Hide snowflakes around a click. Returns how many disappeared.
    pub fn hide_near(&mut self, x: f32, y: f32) -> usize {
        if self.is_over() {
            return 0;
        }
        let hidden = self
            .particles
            .hide_near(Vec2::new(x, y), self.settings.hide_radius);
        if hidden > 0 {
            log::debug!("Pointer at ({:.0}, {:.0}) hid {} snowflake(s)", x, y, hidden);
        }
        hidden
    }

    /// Advance one frame and draw it
    pub fn tick<C: Canvas>(&mut self, canvas: &mut C) -> TickOutcome {
        if self.is_over() {
            return TickOutcome::Frozen;
        }

        self.state.time_ticks += 1;

        self.player.integrate(self.settings.player_step);
        self.state.speed_multiplier = self.player.current_speed_multiplier();
        self.particles.advance(self.state.speed_multiplier);
        self.resolve_collisions();
        self.render(canvas);

        if self.is_over() {
            canvas.clear_and_stop();
            TickOutcome::GameOver
        } else {
            TickOutcome::Running
        }
    }

    /// Every visible snowflake inside the player costs a life and respawns,
    /// in slot order. Reaching zero lives ends the run on the spot.
    fn resolve_collisions(&mut self) {
        let bounds = self.player_bounds();
        let hits: Vec<usize> = self
            .particles
            .visible()
            .filter(|(_, particle)| collision::check(&bounds, particle))
            .map(|(index, _)| index)
            .collect();

        for index in hits {
            if self.is_over() {
                break;
            }
            let lives = self.state.lose_life();
            self.particles.respawn(index);
            log::info!("Hit by snowflake {} ({} lives left)", index, lives);

            if lives == 0 {
                self.enter_game_over();
            }
        }
    }

    /// Runs at most once per game
    fn enter_game_over(&mut self) {
        if self.state.phase == GamePhase::GameOver {
            return;
        }
        self.state.phase = GamePhase::GameOver;
        self.particles.hide_all();
        self.player.relocate_offscreen();
        log::info!("Game over after {} ticks", self.state.time_ticks);
    }

    fn render<C: Canvas>(&self, canvas: &mut C) {
        canvas.draw_background();

        for (_, particle) in self.particles.visible() {
            canvas.draw_ellipse(particle.pos.x, particle.pos.y, SNOWFLAKE_DIAMETER);
        }

        canvas.draw_image(ImageHandle::Player, self.player.pos.x, self.player.pos.y);

        // Hearts fill in from the top-right corner
        let heart = canvas.measure_image(ImageHandle::Heart);
        for i in 0..self.state.lives {
            let x = self.screen.x - (i as f32 + 1.0) * (heart.width as f32 + HEART_SPACING) - HUD_MARGIN;
            canvas.draw_image(ImageHandle::Heart, x, HUD_MARGIN);
        }

        if self.is_over() {
            canvas.draw_image(ImageHandle::GameOver, 0.0, 0.0);
        }
    }

    /// Teleport a snowflake (deterministic test setups)
    pub fn debug_place_particle(&mut self, index: usize, x: f32, y: f32) {
        self.particles.debug_place(index, Vec2::new(x, y));
    }

    /// Override the lives counter (deterministic test setups)
    pub fn debug_set_lives(&mut self, lives: u8) {
        self.state.lives = lives.min(MAX_LIVES);
    }
}
