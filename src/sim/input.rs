//! Logical key state and per-tick input snapshots
//!
//! The host translates platform key codes into `GameKey`s. `InputMapper`
//! holds the currently-held set; once per tick it is latched into a
//! `TickInput` carrying both the held set and the keys that went down since
//! the previous latch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of logical keys. Discriminants are the bit values of the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum GameKey {
    Spacebar = 1,
    DownArrow = 2,
    LeftArrow = 4,
    RightArrow = 8,
    A = 16,
    S = 32,
    Colon = 64,
    Quote = 128,
}

impl GameKey {
    pub const ALL: [GameKey; 8] = [
        GameKey::Spacebar,
        GameKey::DownArrow,
        GameKey::LeftArrow,
        GameKey::RightArrow,
        GameKey::A,
        GameKey::S,
        GameKey::Colon,
        GameKey::Quote,
    ];

    #[inline]
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

/// A raw key code outside the logical key set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown key code {0:#x}")]
pub struct KeyCodeError(pub u32);

impl TryFrom<u32> for GameKey {
    type Error = KeyCodeError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        GameKey::ALL
            .into_iter()
            .find(|key| key.bit() as u32 == code)
            .ok_or(KeyCodeError(code))
    }
}

/// Bitmask over `GameKey`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMask(pub u8);

impl KeyMask {
    pub const EMPTY: KeyMask = KeyMask(0);

    /// Keys that make the player flap
    pub const FLAP: KeyMask = KeyMask(
        GameKey::Spacebar.bit() | GameKey::DownArrow.bit() | GameKey::S.bit() | GameKey::Colon.bit(),
    );
    /// Keys that steer left
    pub const LEFT: KeyMask = KeyMask(GameKey::LeftArrow.bit() | GameKey::A.bit());
    /// Keys that steer right
    pub const RIGHT: KeyMask = KeyMask(GameKey::RightArrow.bit() | GameKey::Quote.bit());

    pub fn from_keys(keys: &[GameKey]) -> Self {
        KeyMask(keys.iter().fold(0, |bits, key| bits | key.bit()))
    }

    #[inline]
    pub const fn contains(&self, key: GameKey) -> bool {
        self.0 & key.bit() != 0
    }

    /// True if any key of `group` is in this mask
    #[inline]
    pub const fn any(&self, group: KeyMask) -> bool {
        self.0 & group.0 != 0
    }

    #[inline]
    pub fn insert(&mut self, key: GameKey) {
        self.0 |= key.bit();
    }

    #[inline]
    pub fn remove(&mut self, key: GameKey) {
        self.0 &= !key.bit();
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Keys held at latch time
    pub held: KeyMask,
    /// Keys that went down since the previous latch
    pub pressed: KeyMask,
}

impl TickInput {
    pub fn flap_held(&self) -> bool {
        self.held.any(KeyMask::FLAP)
    }

    pub fn flap_pressed(&self) -> bool {
        self.pressed.any(KeyMask::FLAP)
    }

    /// Held steering direction: -1 left, 1 right, 0 none or both
    pub fn direction(&self) -> i32 {
        Self::axis(self.held)
    }

    /// Steering direction from keys that just went down, same encoding
    pub fn direction_pressed(&self) -> i32 {
        Self::axis(self.pressed)
    }

    fn axis(mask: KeyMask) -> i32 {
        let left = mask.any(KeyMask::LEFT) as i32;
        let right = mask.any(KeyMask::RIGHT) as i32;
        right - left
    }
}

/// Tracks currently held logical keys between ticks
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    held: KeyMask,
    /// Mask as of the previous latch
    previous: KeyMask,
    /// Keys that went down since the previous latch, even if already released
    tapped: KeyMask,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key held. Repeats are no-ops.
    pub fn key_down(&mut self, key: GameKey) {
        if !self.held.contains(key) {
            self.held.insert(key);
            self.tapped.insert(key);
        }
    }

    /// Mark a key released. Releasing an unheld key is a no-op.
    pub fn key_up(&mut self, key: GameKey) {
        self.held.remove(key);
    }

    pub fn is_held(&self, key: GameKey) -> bool {
        self.held.contains(key)
    }

    pub fn held(&self) -> KeyMask {
        self.held
    }

    /// Snapshot for the coming tick and start a new edge window
    pub fn latch(&mut self) -> TickInput {
        let pressed = KeyMask((self.held.0 & !self.previous.0) | self.tapped.0);
        let input = TickInput {
            held: self.held,
            pressed,
        };
        self.previous = self.held;
        self.tapped = KeyMask::EMPTY;
        input
    }

    /// Drop all key state (new game)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
