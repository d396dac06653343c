//! Rendering interface
//!
//! The game draws through the `Renderer` capability trait and never touches a
//! graphics API directly. Sprite sheets are opaque handles; the game only
//! picks source and destination rectangles.

pub mod recording;
pub mod scene;

pub use recording::{DrawCommand, RecordingRenderer};
pub use scene::draw_scene;

use crate::sim::{Point, Rect};

/// Pre-loaded sprite sheets, owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteSheet {
    Background,
    Torches,
    Player,
    Platform,
    Numbers,
    Hand,
}

/// Drawing primitives a backend provides
pub trait Renderer {
    /// The drawable area changed size
    fn resize(&mut self, width: i32, height: i32);

    fn clear(&mut self);

    fn set_fill_color(&mut self, r: u8, g: u8, b: u8);

    /// Fill with the current fill color
    fn fill_rect(&mut self, rect: &Rect);

    /// Start a polyline batch drawn `width` pixels wide in the fill color
    fn begin_lines(&mut self, width: f32);

    fn move_to(&mut self, h: i32, v: i32);

    fn line_to(&mut self, h: i32, v: i32);

    fn end_lines(&mut self);

    fn draw_line(&mut self, h1: i32, v1: i32, h2: i32, v2: i32) {
        self.begin_lines(1.0);
        self.move_to(h1, v1);
        self.line_to(h2, v2);
        self.end_lines();
    }

    /// Current drawable rectangle
    fn bounds(&self) -> Rect;

    /// Blit `src` of `sheet` into `dest`
    fn draw_image(&mut self, sheet: SpriteSheet, src: &Rect, dest: &Rect);

    /// Polyline through `points`
    fn draw_polyline(&mut self, points: &[Point], width: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.begin_lines(width);
        self.move_to(first.x, first.y);
        for point in rest {
            self.line_to(point.x, point.y);
        }
        self.end_lines();
    }
}
