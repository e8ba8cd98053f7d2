use glam::Vec2;
use proptest::prelude::*;

use snow_dodge::Settings;
use snow_dodge::consts::{OFFSCREEN, WINDOW_HEIGHT};
use snow_dodge::platform::{InputRouter, Key};
use snow_dodge::renderer::VertexCanvas;
use snow_dodge::sim::{GameLoop, Particle, TickOutcome};

fn new_game(seed: u64) -> (GameLoop, VertexCanvas) {
    let settings = Settings {
        seed: Some(seed),
        ..Default::default()
    };
    let game = GameLoop::new(settings, 0).expect("default settings are valid");
    let canvas = VertexCanvas::new(game.assets().clone());
    (game, canvas)
}

/// A point well inside the player's sprite at its spawn position
fn inside_player(game: &GameLoop) -> (f32, f32) {
    let bounds = game.player_bounds();
    (
        bounds.pos.x + bounds.size.x / 2.0,
        bounds.pos.y + bounds.size.y / 2.0,
    )
}

#[test]
fn collision_costs_one_life_and_respawns_snowflake() {
    let (mut game, mut canvas) = new_game(1);
    let (x, y) = inside_player(&game);
    game.debug_place_particle(0, x, y);

    assert_eq!(game.tick(&mut canvas), TickOutcome::Running);

    assert_eq!(game.state().lives, 2);
    assert!(!game.is_over());
    let flake = game.particles().get(0).unwrap();
    assert!(flake.pos.y < 0.0, "respawned above the screen");
    assert!(!game.player_bounds().contains(flake.pos));
}

#[test]
fn hidden_snowflake_inside_player_is_harmless() {
    let (mut game, mut canvas) = new_game(8);
    let (x, y) = inside_player(&game);
    game.debug_place_particle(0, x, y);
    assert_eq!(InputRouter::new(&mut game).pointer_down(x, y), 1);

    assert_eq!(game.tick(&mut canvas), TickOutcome::Running);

    assert_eq!(game.state().lives, 3);
    let flake = game.particles().get(0).unwrap();
    assert!(flake.hidden);
    assert_eq!(flake.pos, Vec2::new(x, y));
}

#[test]
fn last_life_ends_the_game() {
    let (mut game, mut canvas) = new_game(2);
    game.debug_set_lives(1);
    let (x, y) = inside_player(&game);
    game.debug_place_particle(0, x, y);

    assert_eq!(game.tick(&mut canvas), TickOutcome::GameOver);

    assert_eq!(game.state().lives, 0);
    assert!(game.is_over());
    assert!(game.particles().as_slice().iter().all(|p| p.hidden));
    assert_eq!(game.player().pos, Vec2::new(OFFSCREEN.0, OFFSCREEN.1));
    assert!(canvas.is_stopped());
}

#[test]
fn nothing_changes_after_game_over() {
    let (mut game, mut canvas) = new_game(3);
    game.debug_set_lives(1);
    let (x, y) = inside_player(&game);
    game.debug_place_particle(0, x, y);
    game.tick(&mut canvas);

    let lives = game.state().lives;
    let particles: Vec<Particle> = game.particles().as_slice().to_vec();
    let player = game.player().clone();

    {
        let mut router = InputRouter::new(&mut game);
        router.key_down(Key::Char('d'));
        router.key_down(Key::ArrowDown);
        router.pointer_down(x, y);
    }
    for _ in 0..10 {
        assert_eq!(game.tick(&mut canvas), TickOutcome::Frozen);
    }

    assert_eq!(game.state().lives, lives);
    assert_eq!(game.particles().as_slice(), particles.as_slice());
    assert_eq!(*game.player(), player);
}

#[test]
fn pointer_hides_only_the_clicked_snowflake() {
    let (mut game, _) = new_game(4);
    // Keep every other snowflake far from the click
    for i in 0..game.particles().len() {
        game.debug_place_particle(i, 10.0 + i as f32 * 7.0, -200.0);
    }
    game.debug_place_particle(42, 300.0, 150.0);

    let hidden = InputRouter::new(&mut game).pointer_down(300.0, 150.0);

    assert_eq!(hidden, 1);
    for (i, p) in game.particles().as_slice().iter().enumerate() {
        assert_eq!(p.hidden, i == 42, "slot {i}");
    }
    assert_eq!(game.state().lives, 3);
}

#[test]
fn hiding_twice_is_harmless() {
    let (mut game, _) = new_game(5);
    game.debug_place_particle(7, 500.0, 100.0);
    let mut router = InputRouter::new(&mut game);
    assert_eq!(router.pointer_down(500.0, 100.0), 1);
    assert_eq!(router.pointer_down(500.0, 100.0), 0);
    assert!(game.particles().get(7).unwrap().hidden);
}

#[test]
fn speed_keys_change_fall_distance() {
    let (mut game, mut canvas) = new_game(6);
    let start = game.particles().get(0).unwrap().pos.y;
    let speed = game.particles().get(0).unwrap().fall_speed;

    InputRouter::new(&mut game).key_down(Key::ArrowUp);
    game.tick(&mut canvas);
    let y = game.particles().get(0).unwrap().pos.y;
    assert!((y - (start + speed * 0.5)).abs() < 1e-4);
}

proptest! {
    #[test]
    fn fast_always_wins_over_slow(slow in any::<bool>(), fast in any::<bool>(), seed in 0u64..1000) {
        let (mut game, mut canvas) = new_game(seed);
        {
            let mut router = InputRouter::new(&mut game);
            if slow { router.key_down(Key::ArrowUp); }
            if fast { router.key_down(Key::ArrowDown); }
        }
        game.tick(&mut canvas);

        let expected = if fast { 2.0 } else if slow { 0.5 } else { 1.0 };
        prop_assert_eq!(game.state().speed_multiplier, expected);
    }

    #[test]
    fn lives_never_increase_and_flakes_stay_on_screen(
        seed in 0u64..10_000,
        keys in proptest::collection::vec(0usize..6, 1..20),
    ) {
        const KEYS: [Key; 6] = [
            Key::Char('w'),
            Key::Char('a'),
            Key::Char('s'),
            Key::Char('d'),
            Key::ArrowUp,
            Key::ArrowDown,
        ];

        let (mut game, mut canvas) = new_game(seed);
        let mut lives = game.state().lives;

        for (step, key) in keys.iter().enumerate() {
            {
                let mut router = InputRouter::new(&mut game);
                if step % 2 == 0 {
                    router.key_down(KEYS[*key]);
                } else {
                    router.key_up(KEYS[*key]);
                }
            }
            for _ in 0..50 {
                game.tick(&mut canvas);
                prop_assert!(game.state().lives <= lives);
                lives = game.state().lives;
                for (_, p) in game.particles().visible() {
                    prop_assert!(p.pos.y <= WINDOW_HEIGHT as f32);
                }
            }
        }
    }
}
