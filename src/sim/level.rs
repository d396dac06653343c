//! Level layouts and session counters
//!
//! Every level draws from the same six ledges; the level index selects how
//! many of them are present. Geometry lives in fixed-capacity arrays with an
//! explicit length and is only rebuilt on level setup.

use super::geom::Rect;
use crate::consts::*;

pub const MAX_LEDGES: usize = 6;
pub const MAX_TOUCH_DOWNS: usize = 6;
pub const MAX_HAZARDS: usize = 24;
pub const MAX_PLATFORM_COPIES: usize = 9;

/// All ledges, in the order layouts consume them
pub const LEDGE_RECTS: [Rect; MAX_LEDGES] = [
    Rect::new(206, 424, 433, 438),  // central dais
    Rect::new(-256, 284, 149, 298), // lower left
    Rect::new(490, 284, 896, 298),  // lower right
    Rect::new(-256, 105, 149, 119), // upper left
    Rect::new(490, 105, 896, 119),  // upper right
    Rect::new(233, 190, 407, 204),  // top centre
];

/// Ledges present per level, cycling
pub const LEDGE_COUNTS: [usize; 4] = [6, 5, 3, 6];

/// Horizontal inset of a touch-down zone from its ledge ends
pub const TOUCH_DOWN_INSET: i32 = 23;
/// Height of a touch-down zone above its ledge
pub const TOUCH_DOWN_HEIGHT: i32 = 11;

/// The lava pit spans the whole width below the lava surface
pub const LAVA_RECT: Rect = Rect::new(0, LAVA_TOP, SCREEN_WIDTH, SCREEN_HEIGHT + 64);

/// Fixed-capacity rectangle list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectList<const N: usize> {
    rects: [Rect; N],
    len: usize,
}

impl<const N: usize> Default for RectList<N> {
    fn default() -> Self {
        Self {
            rects: [Rect::ZERO; N],
            len: 0,
        }
    }
}

impl<const N: usize> RectList<N> {
    pub const CAPACITY: usize = N;

    /// Append; returns false (and drops the rect) when full
    pub fn push(&mut self, rect: Rect) -> bool {
        if self.len == N {
            log::warn!("rect list full ({}), dropping {:?}", N, rect);
            return false;
        }
        self.rects[self.len] = rect;
        self.len += 1;
        true
    }

    pub fn get(&self, index: usize) -> Option<&Rect> {
        self.as_slice().get(index)
    }

    pub fn as_slice(&self) -> &[Rect] {
        &self.rects[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}

/// Static collision and drawing geometry for one level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelGeometry {
    /// On-screen part of each ledge, in `LEDGE_RECTS` order
    pub ledges: RectList<MAX_LEDGES>,
    /// Safe landing strips, parallel to `ledges`
    pub touch_downs: RectList<MAX_TOUCH_DOWNS>,
    pub hazards: RectList<MAX_HAZARDS>,
    /// On-screen slices of the ledges, for tiled drawing
    pub platform_copies: RectList<MAX_PLATFORM_COPIES>,
}

impl LevelGeometry {
    pub fn for_level(level: u32) -> Self {
        let num_ledges = ledge_count(level);
        let screen = Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT);
        let mut geometry = Self::default();

        // Collision runs on the wrap cylinder, so only the drawn slice of a
        // ledge is solid; the seam joins the two halves of a split ledge.
        for ledge in &LEDGE_RECTS[..num_ledges] {
            let Some(visible) = ledge.intersection(&screen) else {
                continue;
            };
            let zone = touch_down_zone(ledge).intersection(&screen).unwrap_or(Rect::ZERO);
            geometry.ledges.push(visible);
            geometry.touch_downs.push(zone);
            geometry.platform_copies.push(visible);
        }
        geometry.hazards.push(LAVA_RECT);
        geometry
    }
}

/// Landing strip sitting on top of a ledge, inset from its ends
pub fn touch_down_zone(ledge: &Rect) -> Rect {
    Rect::new(
        ledge.left + TOUCH_DOWN_INSET,
        ledge.top - TOUCH_DOWN_HEIGHT,
        ledge.right - TOUCH_DOWN_INSET,
        ledge.top,
    )
}

pub fn ledge_count(level: u32) -> usize {
    LEDGE_COUNTS[level as usize % LEDGE_COUNTS.len()]
}

/// Outcome of losing a life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeOutcome {
    /// Lives remain; the level is set up again
    Respawn { lives_left: u32 },
    /// No lives remain; the session is over
    SessionEnded,
}

/// Level index, ledge selection and lives
#[derive(Debug, Clone)]
pub struct LevelManager {
    level_on: u32,
    num_ledges: usize,
    lives_left: u32,
    geometry: LevelGeometry,
}

impl LevelManager {
    pub fn new(starting_lives: u32) -> Self {
        Self {
            level_on: 0,
            num_ledges: ledge_count(0),
            lives_left: starting_lives,
            geometry: LevelGeometry::for_level(0),
        }
    }

    /// Rebuild the geometry for the current level index
    pub fn set_up_level(&mut self) {
        self.num_ledges = ledge_count(self.level_on);
        self.geometry = LevelGeometry::for_level(self.level_on);
        log::info!(
            "Level {} set up: {} ledges, {} lives",
            self.level_on + 1,
            self.num_ledges,
            self.lives_left
        );
    }

    /// Move to the next level index; geometry is rebuilt by `set_up_level`
    pub fn advance(&mut self) {
        self.level_on += 1;
    }

    /// Decrement lives, never below zero
    pub fn lose_life(&mut self) -> LifeOutcome {
        self.lives_left = self.lives_left.saturating_sub(1);
        if self.lives_left == 0 {
            LifeOutcome::SessionEnded
        } else {
            LifeOutcome::Respawn {
                lives_left: self.lives_left,
            }
        }
    }

    pub fn level_on(&self) -> u32 {
        self.level_on
    }

    pub fn num_ledges(&self) -> usize {
        self.num_ledges
    }

    pub fn lives_left(&self) -> u32 {
        self.lives_left
    }

    pub fn geometry(&self) -> &LevelGeometry {
        &self.geometry
    }
}
