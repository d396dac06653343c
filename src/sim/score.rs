//! Score, lives and level counters with per-digit glyph displays
//!
//! Each display keeps one glyph index per decimal position (position 0 is the
//! ones digit) and a changed flag per position, so a renderer can redraw only
//! the glyphs that moved since the flags were last cleared.

use super::geom::{Point, Rect};

/// Glyph index for an unlit leading position
pub const BLANK_DIGIT: usize = 10;
/// Ten digits plus the blank
pub const NUM_GLYPHS: usize = 11;

pub const DIGIT_WIDTH: i32 = 16;
pub const DIGIT_HEIGHT: i32 = 15;

/// Source rects on the numbers sheet; glyph `i` is digit `i`, the last is blank
pub const NUMBER_GLYPHS: [Rect; NUM_GLYPHS] = {
    let mut glyphs = [Rect::ZERO; NUM_GLYPHS];
    let mut i = 0;
    while i < NUM_GLYPHS {
        glyphs[i] = Rect::from_origin(0, i as i32 * DIGIT_HEIGHT, DIGIT_WIDTH, DIGIT_HEIGHT);
        i += 1;
    }
    glyphs
};

pub const SCORE_DIGITS: usize = 5;
pub const LIVES_DIGITS: usize = 2;
pub const LEVEL_DIGITS: usize = 3;

/// Largest score the five-digit display can show
pub const MAX_SCORE: u32 = 99_999;

/// Top-left corners of the on-screen counters
pub const LIVES_ORIGIN: Point = Point::new(180, 441);
pub const SCORE_ORIGIN: Point = Point::new(260, 441);
pub const LEVEL_ORIGIN: Point = Point::new(400, 441);

/// Decimal glyph display of `N` positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitDisplay<const N: usize> {
    digits: [usize; N],
    changed: [bool; N],
}

impl<const N: usize> DigitDisplay<N> {
    /// Largest value that fits
    pub const MAX: u32 = 10u32.pow(N as u32) - 1;

    /// Display showing `value`, every position flagged for drawing
    pub fn new(value: u32) -> Self {
        let mut display = Self {
            digits: [BLANK_DIGIT; N],
            changed: [true; N],
        };
        display.set(value);
        display.changed = [true; N];
        display
    }

    /// Show `value` (clamped to `MAX`), flagging the positions that change.
    /// Leading zeros are blank; the ones position always shows a digit.
    pub fn set(&mut self, value: u32) {
        let value = value.min(Self::MAX);
        let mut rest = value;
        for pos in 0..N {
            let glyph = if pos > 0 && rest == 0 {
                BLANK_DIGIT
            } else {
                (rest % 10) as usize
            };
            rest /= 10;
            if self.digits[pos] != glyph {
                self.digits[pos] = glyph;
                self.changed[pos] = true;
            }
        }
    }

    /// Glyph index at `pos` (0 = ones)
    pub fn digit(&self, pos: usize) -> Option<usize> {
        self.digits.get(pos).copied()
    }

    pub fn changed(&self, pos: usize) -> bool {
        self.changed.get(pos).copied().unwrap_or(false)
    }

    pub fn any_changed(&self) -> bool {
        self.changed.iter().any(|&c| c)
    }

    pub fn clear_changes(&mut self) {
        self.changed = [false; N];
    }

    /// Rebuild the integer from the glyphs, blanks counting as zero
    pub fn value(&self) -> u32 {
        self.digits
            .iter()
            .rev()
            .fold(0, |acc, &glyph| acc * 10 + if glyph == BLANK_DIGIT { 0 } else { glyph as u32 })
    }

    /// Screen rect of position `pos` for a display whose leftmost glyph sits at `origin`
    pub fn dest_rect(origin: Point, pos: usize) -> Rect {
        let column = (N - 1 - pos.min(N - 1)) as i32;
        Rect::from_origin(origin.x + column * DIGIT_WIDTH, origin.y, DIGIT_WIDTH, DIGIT_HEIGHT)
    }
}

#[derive(Debug, Clone)]
pub struct ScoreTracker {
    score: u32,
    /// The score has reached five digits this session
    had_tens_of_thousands: bool,
    score_digits: DigitDisplay<SCORE_DIGITS>,
    lives_digits: DigitDisplay<LIVES_DIGITS>,
    level_digits: DigitDisplay<LEVEL_DIGITS>,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self {
            score: 0,
            had_tens_of_thousands: false,
            score_digits: DigitDisplay::new(0),
            lives_digits: DigitDisplay::new(0),
            level_digits: DigitDisplay::new(1),
        }
    }
}

impl ScoreTracker {
    /// Zero the score; every glyph is redrawn
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Add points, saturating at `MAX_SCORE`. Returns the new score.
    pub fn add(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points).min(MAX_SCORE);
        if self.score >= 10_000 && !self.had_tens_of_thousands {
            self.had_tens_of_thousands = true;
            log::debug!("score reached five digits");
        }
        self.score_digits.set(self.score);
        self.score
    }

    pub fn set_lives(&mut self, lives: u32) {
        self.lives_digits.set(lives);
    }

    /// Show a zero-based level index as a one-based level number
    pub fn set_level(&mut self, level_on: u32) {
        self.level_digits.set(level_on.saturating_add(1));
    }

    pub fn clear_changes(&mut self) {
        self.score_digits.clear_changes();
        self.lives_digits.clear_changes();
        self.level_digits.clear_changes();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn had_tens_of_thousands(&self) -> bool {
        self.had_tens_of_thousands
    }

    pub fn score_digits(&self) -> &DigitDisplay<SCORE_DIGITS> {
        &self.score_digits
    }

    pub fn lives_digits(&self) -> &DigitDisplay<LIVES_DIGITS> {
        &self.lives_digits
    }

    pub fn level_digits(&self) -> &DigitDisplay<LEVEL_DIGITS> {
        &self.level_digits
    }
}
