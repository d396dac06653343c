//! Simulation clock and sprite animation throttling
//!
//! Time is derived from the tick count, never from the wall clock, so a run is
//! reproducible for a given seed and input sequence.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Seconds between torch flame re-rolls
pub const FLAME_INTERVAL: f64 = 0.25;
/// Flame frames per torch on the sprite sheet
pub const NUM_FLAME_FRAMES: usize = 4;
/// Torches on the playfield
pub const NUM_TORCHES: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationClock {
    ticks: u64,
    tick_secs: f64,
    /// Toggles every tick; slow sprites only animate on even frames
    even_frame: bool,
    last_flame: f64,
    flames: [usize; NUM_TORCHES],
}

impl AnimationClock {
    pub fn new(update_frequency: f64) -> Self {
        Self {
            ticks: 0,
            tick_secs: 1.0 / update_frequency,
            even_frame: true,
            last_flame: 0.0,
            flames: [0, 2],
        }
    }

    /// Advance one tick and re-roll the torch flames when due
    pub fn advance<R: Rng>(&mut self, rng: &mut R) {
        self.ticks += 1;
        self.even_frame = !self.even_frame;

        let now = self.now();
        if self.even_frame && now - self.last_flame >= FLAME_INTERVAL {
            for flame in &mut self.flames {
                *flame = rng.random_range(0..NUM_FLAME_FRAMES);
            }
            self.last_flame = now;
        }
    }

    /// Elapsed simulation time in seconds
    pub fn now(&self) -> f64 {
        self.ticks as f64 * self.tick_secs
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn even_frame(&self) -> bool {
        self.even_frame
    }

    /// Current flame frame per torch
    pub fn flames(&self) -> [usize; NUM_TORCHES] {
        self.flames
    }
}
