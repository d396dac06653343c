//! Scene composition
//!
//! Draws the committed game state back to front: background, torches,
//! ledges, lightning, player, hand, then the counters. The playfield is
//! centred in the renderer's bounds. Drawing never mutates the state.

use super::{Renderer, SpriteSheet};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::anim::NUM_TORCHES;
use crate::sim::hand::HAND_FRAMES;
use crate::sim::player::PLAYER_FRAMES;
use crate::sim::score::{DigitDisplay, LEVEL_ORIGIN, LIVES_ORIGIN, NUMBER_GLYPHS, SCORE_ORIGIN};
use crate::sim::{GamePhase, GameState, Point, Rect};

pub const TORCH_WIDTH: i32 = 16;
pub const TORCH_HEIGHT: i32 = 24;

/// Flames sit on the two obelisks
pub const TORCH_DESTS: [Rect; NUM_TORCHES] = [
    Rect::from_origin(164, 226, TORCH_WIDTH, TORCH_HEIGHT),
    Rect::from_origin(460, 226, TORCH_WIDTH, TORCH_HEIGHT),
];

const BOLT_WIDTH: f32 = 2.0;

/// Top-left corner of the playfield inside `bounds`
pub fn playfield_origin(bounds: &Rect) -> Point {
    Point::new(
        bounds.left + (bounds.width() - SCREEN_WIDTH) / 2,
        bounds.top + (bounds.height() - SCREEN_HEIGHT) / 2,
    )
}

pub fn draw_scene(state: &GameState, r: &mut dyn Renderer) {
    let origin = playfield_origin(&r.bounds());
    let place = |rect: &Rect| rect.offset(origin.x, origin.y);
    let playfield = Rect::from_origin(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT);

    r.clear();
    r.draw_image(SpriteSheet::Background, &playfield, &place(&playfield));

    for (flame, dest) in state.clock.flames().iter().zip(&TORCH_DESTS) {
        let src = Rect::from_origin(0, *flame as i32 * TORCH_HEIGHT, TORCH_WIDTH, TORCH_HEIGHT);
        r.draw_image(SpriteSheet::Torches, &src, &place(dest));
    }

    for copy in state.level.geometry().platform_copies.as_slice() {
        let src = Rect::from_origin(0, 0, copy.width(), copy.height());
        r.draw_image(SpriteSheet::Platform, &src, &place(copy));
    }

    if state.lightning.is_visible(state.clock.now()) {
        r.set_fill_color(255, 255, 255);
        for branch in [state.lightning.left(), state.lightning.right()] {
            let points = branch.map(|p| p + origin);
            r.draw_polyline(&points, BOLT_WIDTH);
        }
    }

    if matches!(state.phase, GamePhase::Playing | GamePhase::Paused) {
        let player = &state.player;
        let src = PLAYER_FRAMES[player.sprite_index()];
        r.draw_image(SpriteSheet::Player, &src, &place(&player.dest));
        if let Some(ghost) = player.ghost() {
            r.draw_image(SpriteSheet::Player, &src, &place(&ghost));
        }
    }

    if !state.hand.is_idle() {
        let src = HAND_FRAMES[state.hand.frame_index()];
        r.draw_image(SpriteSheet::Hand, &src, &place(&state.hand.dest));
    }

    draw_digits(r, state.score.lives_digits(), LIVES_ORIGIN + origin);
    draw_digits(r, state.score.score_digits(), SCORE_ORIGIN + origin);
    draw_digits(r, state.score.level_digits(), LEVEL_ORIGIN + origin);

    if state.phase == GamePhase::Paused {
        r.set_fill_color(0, 0, 0);
        r.fill_rect(&place(&Rect::from_origin(SCREEN_WIDTH / 2 - 60, SCREEN_HEIGHT / 2 - 12, 120, 24)));
    }
}

fn draw_digits<const N: usize>(r: &mut dyn Renderer, display: &DigitDisplay<N>, origin: Point) {
    for pos in 0..N {
        let Some(glyph) = display.digit(pos) else {
            continue;
        };
        let dest = DigitDisplay::<N>::dest_rect(origin, pos);
        r.draw_image(SpriteSheet::Numbers, &NUMBER_GLYPHS[glyph], &dest);
    }
}
