//! Rendering module
//!
//! The simulation draws through the `Canvas` trait. `VertexCanvas` turns
//! those calls into triangles that the WebGPU pipeline presents.

pub mod batch;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use batch::VertexCanvas;
pub use pipeline::RenderState;

use crate::error::StartupError;

/// Opaque handles for the game's images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageHandle {
    Background,
    Player,
    Heart,
    GameOver,
}

impl ImageHandle {
    pub const ALL: [ImageHandle; 4] = [
        ImageHandle::Background,
        ImageHandle::Player,
        ImageHandle::Heart,
        ImageHandle::GameOver,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ImageHandle::Background => "background",
            ImageHandle::Player => "player",
            ImageHandle::Heart => "heart",
            ImageHandle::GameOver => "gameover",
        }
    }
}

/// Pixel dimensions of a pre-scaled image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Sprite table, every image pre-scaled to a fixed fraction of the window
#[derive(Debug, Clone, PartialEq)]
pub struct Assets {
    pub background: ImageSize,
    pub player: ImageSize,
    pub heart: ImageSize,
    pub game_over: ImageSize,
}

impl Assets {
    /// Player is 1/16 x 1/8 of the window, hearts 1/24 x 1/12,
    /// background and game-over screens fill it.
    pub fn for_window(width: u32, height: u32) -> Result<Self, StartupError> {
        let assets = Self {
            background: ImageSize { width, height },
            player: ImageSize {
                width: width / 16,
                height: height / 8,
            },
            heart: ImageSize {
                width: width / 24,
                height: height / 12,
            },
            game_over: ImageSize { width, height },
        };

        for handle in ImageHandle::ALL {
            let size = assets.size(handle);
            if size.width == 0 || size.height == 0 {
                return Err(StartupError::Asset {
                    name: handle.name(),
                    reason: format!(
                        "scaled to {}x{} for a {}x{} window",
                        size.width, size.height, width, height
                    ),
                });
            }
        }

        Ok(assets)
    }

    pub fn size(&self, handle: ImageHandle) -> ImageSize {
        match handle {
            ImageHandle::Background => self.background,
            ImageHandle::Player => self.player,
            ImageHandle::Heart => self.heart,
            ImageHandle::GameOver => self.game_over,
        }
    }
}

/// Drawing primitives supplied by the host
pub trait Canvas {
    /// Paint the full-window background image
    fn draw_background(&mut self);
    /// Filled white ellipse centred on (x, y)
    fn draw_ellipse(&mut self, x: f32, y: f32, diameter: f32);
    /// Image with its top-left corner at (x, y)
    fn draw_image(&mut self, handle: ImageHandle, x: f32, y: f32);
    fn measure_image(&self, handle: ImageHandle) -> ImageSize;
    /// The host loop should stop issuing ticks
    fn clear_and_stop(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_for_default_window() {
        let assets = Assets::for_window(800, 400).unwrap();
        assert_eq!(assets.player, ImageSize { width: 50, height: 50 });
        assert_eq!(assets.heart, ImageSize { width: 33, height: 33 });
        assert_eq!(assets.game_over, ImageSize { width: 800, height: 400 });
    }

    #[test]
    fn test_tiny_window_is_startup_fault() {
        let err = Assets::for_window(10, 400).unwrap_err();
        assert!(matches!(err, StartupError::Asset { name: "player", .. }));
    }
}
