//! Headless renderer that records draw calls
//!
//! Used by the demo binary and by tests to inspect what a frame draws.

use super::{Renderer, SpriteSheet};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillColor(u8, u8, u8),
    FillRect(Rect),
    BeginLines(f32),
    MoveTo(Point),
    LineTo(Point),
    EndLines,
    Image { sheet: SpriteSheet, src: Rect, dest: Rect },
}

#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    width: i32,
    height: i32,
    commands: Vec<DrawCommand>,
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl RecordingRenderer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Hand over the recorded frame and start a new one
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Destination rects of every blit from `sheet`
    pub fn images_of(&self, sheet: SpriteSheet) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Image { sheet: s, dest, .. } if *s == sheet => Some(*dest),
                _ => None,
            })
            .collect()
    }

    /// Number of polylines drawn
    pub fn polyline_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::BeginLines(_)))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn set_fill_color(&mut self, r: u8, g: u8, b: u8) {
        self.commands.push(DrawCommand::FillColor(r, g, b));
    }

    fn fill_rect(&mut self, rect: &Rect) {
        self.commands.push(DrawCommand::FillRect(*rect));
    }

    fn begin_lines(&mut self, width: f32) {
        self.commands.push(DrawCommand::BeginLines(width));
    }

    fn move_to(&mut self, h: i32, v: i32) {
        self.commands.push(DrawCommand::MoveTo(Point::new(h, v)));
    }

    fn line_to(&mut self, h: i32, v: i32) {
        self.commands.push(DrawCommand::LineTo(Point::new(h, v)));
    }

    fn end_lines(&mut self) {
        self.commands.push(DrawCommand::EndLines);
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn draw_image(&mut self, sheet: SpriteSheet, src: &Rect, dest: &Rect) {
        self.commands.push(DrawCommand::Image {
            sheet,
            src: *src,
            dest: *dest,
        });
    }
}
