//! A `Canvas` that tessellates draw calls into a vertex list
//!
//! Decoded image data is not available here, so each image is drawn as a
//! quad of its measured size in a per-image color.

use glam::Vec2;

use super::shapes::{self, CIRCLE_SEGMENTS};
use super::vertex::{Vertex, colors};
use super::{Assets, Canvas, ImageHandle, ImageSize};

pub struct VertexCanvas {
    assets: Assets,
    vertices: Vec<Vertex>,
    stopped: bool,
}

impl VertexCanvas {
    pub fn new(assets: Assets) -> Self {
        Self {
            assets,
            vertices: Vec::new(),
            stopped: false,
        }
    }

    /// Drop the previous frame's geometry
    pub fn begin_frame(&mut self) {
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Whether the game asked the host loop to stop
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn tint(handle: ImageHandle) -> [f32; 4] {
        match handle {
            ImageHandle::Background => colors::BACKGROUND,
            ImageHandle::Player => colors::PLAYER,
            ImageHandle::Heart => colors::HEART,
            ImageHandle::GameOver => colors::GAME_OVER,
        }
    }
}

impl Canvas for VertexCanvas {
    fn draw_background(&mut self) {
        self.draw_image(ImageHandle::Background, 0.0, 0.0);
    }

    fn draw_ellipse(&mut self, x: f32, y: f32, diameter: f32) {
        self.vertices.extend(shapes::circle(
            Vec2::new(x, y),
            diameter / 2.0,
            colors::SNOWFLAKE,
            CIRCLE_SEGMENTS,
        ));
    }

    fn draw_image(&mut self, handle: ImageHandle, x: f32, y: f32) {
        let size = self.measure_image(handle);
        self.vertices.extend(shapes::rect(
            Vec2::new(x, y),
            Vec2::new(size.width as f32, size.height as f32),
            Self::tint(handle),
        ));
    }

    fn measure_image(&self, handle: ImageHandle) -> ImageSize {
        self.assets.size(handle)
    }

    fn clear_and_stop(&mut self) {
        self.stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_accumulates_and_resets() {
        let mut canvas = VertexCanvas::new(Assets::for_window(800, 400).unwrap());
        canvas.draw_background();
        canvas.draw_ellipse(10.0, 10.0, 10.0);
        assert_eq!(canvas.vertices().len(), 6 + CIRCLE_SEGMENTS as usize * 3);

        canvas.begin_frame();
        assert!(canvas.vertices().is_empty());
    }

    #[test]
    fn test_player_quad_uses_sprite_size() {
        let mut canvas = VertexCanvas::new(Assets::for_window(800, 400).unwrap());
        canvas.draw_image(ImageHandle::Player, 100.0, 200.0);
        let max_x = canvas
            .vertices()
            .iter()
            .map(|v| v.position[0])
            .fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(max_x, 150.0);
        assert!(canvas.vertices().iter().all(|v| v.color == colors::PLAYER));
    }

    #[test]
    fn test_stop_is_sticky() {
        let mut canvas = VertexCanvas::new(Assets::for_window(800, 400).unwrap());
        assert!(!canvas.is_stopped());
        canvas.clear_and_stop();
        canvas.begin_frame();
        assert!(canvas.is_stopped());
    }
}
