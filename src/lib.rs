//! Glypha - a flap-and-joust platform arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, collisions, lightning, hand)
//! - `game`: Host-facing facade (input events, update/draw entry points)
//! - `renderer`: Drawing capability interface and scene composition
//! - `audio`: Sound effect catalogue and output gate
//! - `settings`: Data-driven configuration

pub mod audio;
pub mod game;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::{Settings, SettingsError};
pub use sim::{GameEvent, GamePhase, GameState};

/// Game configuration constants
pub mod consts {
    /// Default simulation rate (ticks per second)
    pub const DEFAULT_UPDATE_FREQUENCY: f64 = 30.0;

    /// Playfield dimensions (pixels). The horizontal extent is also the wrap width.
    pub const SCREEN_WIDTH: i32 = 640;
    pub const SCREEN_HEIGHT: i32 = 460;

    /// Positions and velocities are stored in 1/16 pixel units
    pub const SUBPIXEL_SHIFT: i32 = 4;

    /// Player sprite size (pixels)
    pub const PLAYER_WIDTH: i32 = 48;
    pub const PLAYER_HEIGHT: i32 = 37;

    /// Upward impulse applied on the tick the flap key goes down (subpixels/tick)
    pub const FLAP_IMPULSE: i32 = 48;
    /// Upward thrust applied every tick the flap key stays held
    pub const FLAP_THRUST: i32 = 12;
    /// Downward acceleration while airborne and not flapping
    pub const GRAVITY: i32 = 8;
    /// Terminal vertical speed, both directions
    pub const MAX_V_VELOCITY: i32 = 512;
    /// Horizontal nudge per tick while flying with a direction held
    pub const GLIDE_IMPULSE: i32 = 12;
    /// Horizontal speed cap while flying
    pub const MAX_H_VELOCITY: i32 = 192;
    /// Horizontal drag per tick while flying with no direction held
    pub const AIR_RESISTANCE: i32 = 2;
    /// Fixed ground speed while walking
    pub const WALK_SPEED: i32 = 64;
    /// Horizontal decay per tick while idle on a ledge
    pub const IDLE_DECAY: i32 = 16;

    /// Lava surface; a player whose feet pass it is lost
    pub const LAVA_TOP: i32 = 456;
    /// Roof line; a player whose head passes it is lost
    pub const ROOF_LINE: i32 = 0;

    /// Lives at the start of a session
    pub const STARTING_LIVES: u32 = 5;
}

/// Convert a subpixel coordinate to whole pixels (floor)
#[inline]
pub fn to_pixels(subpixels: i32) -> i32 {
    subpixels >> consts::SUBPIXEL_SHIFT
}

/// Convert whole pixels to subpixels
#[inline]
pub fn to_subpixels(pixels: i32) -> i32 {
    pixels << consts::SUBPIXEL_SHIFT
}

/// Wrap a coordinate into `[0, width)`
#[inline]
pub fn wrap_coord(value: i32, width: i32) -> i32 {
    value.rem_euclid(width)
}
