//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only; time is the tick count times the tick length
//! - Seeded RNG only
//! - Fixed-capacity geometry, iterated in index order
//! - No rendering or platform dependencies

pub mod anim;
pub mod collision;
pub mod events;
pub mod geom;
pub mod hand;
pub mod input;
pub mod level;
pub mod lightning;
pub mod player;
pub mod score;
pub mod state;
pub mod tick;

pub use anim::AnimationClock;
pub use collision::{LethalContact, PlatformContact};
pub use events::{DeathCause, GameEvent};
pub use geom::{Point, Rect};
pub use hand::{Hand, HandMode};
pub use input::{GameKey, InputMapper, KeyCodeError, KeyMask, TickInput};
pub use level::{LevelGeometry, LevelManager, LifeOutcome};
pub use lightning::{Lightning, NUM_LIGHTNING_PTS};
pub use player::{Player, PlayerMode};
pub use score::{DigitDisplay, ScoreTracker};
pub use state::{GamePhase, GameState};
pub use tick::tick;
