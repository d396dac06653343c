//! Events emitted by a tick, for sound and the host

use serde::{Deserialize, Serialize};

use super::geom::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Lava,
    Roof,
    Lightning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Flapped,
    Landed { ledge: usize, touch_down: bool },
    Bonked,
    /// Crossed the screen edge
    Wrapped,
    LightningStrike { origin: Point, lethal: bool },
    HandReaching,
    Grabbed,
    Escaped,
    /// The hand let go at the rest position
    Released,
    LifeLost { cause: DeathCause, lives_left: u32 },
    /// Last life lost; terminal until `new_game`
    SessionEnded { score: u32, level: u32 },
    ScoreChanged { score: u32 },
    LevelStarted { level: u32 },
}
