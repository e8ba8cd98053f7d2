//! Keyboard and pointer routing

use crate::sim::{Direction, GameLoop, SpeedFlag};

/// A key as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    ArrowUp,
    ArrowDown,
    Other,
}

impl Key {
    /// From a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }
}

/// What a bound key controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Move(Direction),
    Speed(SpeedFlag),
}

impl Control {
    /// WASD moves (either case), Up arrow slows the snow, Down arrow speeds it up
    pub fn for_key(key: Key) -> Option<Self> {
        match key {
            Key::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Control::Move(Direction::Up)),
                's' => Some(Control::Move(Direction::Down)),
                'a' => Some(Control::Move(Direction::Left)),
                'd' => Some(Control::Move(Direction::Right)),
                _ => None,
            },
            Key::ArrowUp => Some(Control::Speed(SpeedFlag::Slow)),
            Key::ArrowDown => Some(Control::Speed(SpeedFlag::Fast)),
            Key::Other => None,
        }
    }
}

/// Forwards input callbacks to the game. Holds the game only for the
/// duration of one callback and never copies its state.
pub struct InputRouter<'a> {
    game: &'a mut GameLoop,
}

impl<'a> InputRouter<'a> {
    pub fn new(game: &'a mut GameLoop) -> Self {
        Self { game }
    }

    pub fn key_down(&mut self, key: Key) {
        self.route_key(key, true);
    }

    pub fn key_up(&mut self, key: Key) {
        self.route_key(key, false);
    }

    /// Hide snowflakes near a click, returns how many
    pub fn pointer_down(&mut self, x: f32, y: f32) -> usize {
        self.game.hide_near(x, y)
    }

    fn route_key(&mut self, key: Key, pressed: bool) {
        match Control::for_key(key) {
            Some(Control::Move(direction)) => self.game.set_direction(direction, pressed),
            Some(Control::Speed(flag)) => self.game.set_speed(flag, pressed),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;

    fn game() -> GameLoop {
        let settings = Settings {
            seed: Some(3),
            ..Default::default()
        };
        GameLoop::new(settings, 0).unwrap()
    }

    #[test]
    fn test_key_from_dom() {
        assert_eq!(Key::from_dom("w"), Key::Char('w'));
        assert_eq!(Key::from_dom("ArrowUp"), Key::ArrowUp);
        assert_eq!(Key::from_dom("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_dom("Shift"), Key::Other);
        assert_eq!(Key::from_dom(""), Key::Other);
    }

    #[test]
    fn test_bindings_ignore_case() {
        assert_eq!(
            Control::for_key(Key::Char('W')),
            Some(Control::Move(Direction::Up))
        );
        assert_eq!(
            Control::for_key(Key::Char('d')),
            Some(Control::Move(Direction::Right))
        );
        assert_eq!(Control::for_key(Key::Char('q')), None);
        assert_eq!(Control::for_key(Key::Other), None);
    }

    #[test]
    fn test_press_and_release() {
        let mut game = game();
        {
            let mut router = InputRouter::new(&mut game);
            router.key_down(Key::Char('A'));
            router.key_down(Key::ArrowDown);
        }
        assert!(game.player().flags.left);
        assert_eq!(game.player().current_speed_multiplier(), 2.0);

        {
            let mut router = InputRouter::new(&mut game);
            router.key_up(Key::Char('a'));
            router.key_up(Key::ArrowDown);
        }
        assert!(!game.player().flags.left);
        assert_eq!(game.player().current_speed_multiplier(), 1.0);
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let mut game = game();
        let before = game.player().clone();
        InputRouter::new(&mut game).key_down(Key::Char('x'));
        assert_eq!(*game.player(), before);
    }

    #[test]
    fn test_pointer_hides_snowflake() {
        let mut game = game();
        game.debug_place_particle(5, 200.0, 150.0);
        let hidden = InputRouter::new(&mut game).pointer_down(200.0, 150.0);
        assert!(hidden >= 1);
        assert!(game.particles().get(5).unwrap().hidden);
    }
}
