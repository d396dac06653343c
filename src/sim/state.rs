//! Game state and session-level operations
//!
//! Everything a tick reads or writes lives in `GameState`. Host operations
//! that happen between ticks (new game, mouse strikes, pause) are methods
//! here so they apply atomically.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::anim::AnimationClock;
use super::events::GameEvent;
use super::geom::{Point, Rect};
use super::hand::Hand;
use super::level::LevelManager;
use super::lightning::{INTRO_STRIKE, Lightning};
use super::player::Player;
use super::score::ScoreTracker;
use crate::consts::*;
use crate::settings::Settings;

/// Seed used when the settings do not pin one
pub const DEFAULT_SEED: u64 = 0x0067_6c79_7068_6100;

/// Where periodic strikes may land
pub const AMBIENT_STRIKE_ZONE: Rect = Rect::new(32, 32, SCREEN_WIDTH - 32, LAVA_TOP - 32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session; strikes are cosmetic
    Attract,
    Playing,
    Paused,
    /// Session ended; only `new_game` resumes play
    GameOver,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub clock: AnimationClock,
    pub player: Player,
    pub hand: Hand,
    pub lightning: Lightning,
    pub level: LevelManager,
    pub score: ScoreTracker,
    pub phase: GamePhase,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Points queued by the host, applied at the next tick
    pub pending_points: u32,
    /// Keep digit change flags through the next tick start (set by host resets)
    pub keep_digit_changes: bool,
    lightning_period: f64,
    starting_lives: u32,
}

impl GameState {
    pub fn new(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or(DEFAULT_SEED);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock: AnimationClock::new(settings.update_frequency),
            player: Player::default(),
            hand: Hand::default(),
            lightning: Lightning::default(),
            level: LevelManager::new(settings.starting_lives),
            score: ScoreTracker::default(),
            phase: GamePhase::Attract,
            events: Vec::new(),
            pending_points: 0,
            keep_digit_changes: true,
            lightning_period: settings.lightning_period_secs,
            starting_lives: settings.starting_lives,
        }
    }

    /// Reset every component and start a session at level 1
    pub fn new_game(&mut self) {
        self.level = LevelManager::new(self.starting_lives);
        self.score.reset();
        self.pending_points = 0;
        self.phase = GamePhase::Playing;
        log::info!("New game: {} lives, seed {:#x}", self.starting_lives, self.seed);
        self.set_up_level();
        self.keep_digit_changes = true;
        self.trigger_strike(INTRO_STRIKE, false);
    }

    /// Put player, hand and lightning back to this level's starting configuration
    pub fn set_up_level(&mut self) {
        self.level.set_up_level();
        self.player.reset();
        self.hand.reset();
        let next_ambient = self.next_ambient_time();
        self.lightning.reset(next_ambient);
        self.score.set_lives(self.level.lives_left());
        self.score.set_level(self.level.level_on());
        self.events.push(GameEvent::LevelStarted {
            level: self.level.level_on(),
        });
    }

    /// Advance to the next level layout; lives carry over
    pub fn next_level(&mut self) {
        if !self.in_session() {
            return;
        }
        self.level.advance();
        self.set_up_level();
        self.keep_digit_changes = true;
    }

    /// Start a lightning burst. Returns false if one is already running.
    pub fn trigger_strike(&mut self, origin: Point, lethal: bool) -> bool {
        let started = self.lightning.trigger(origin, self.clock.now(), lethal);
        if started {
            self.events.push(GameEvent::LightningStrike { origin, lethal });
        }
        started
    }

    /// Mouse-down at `point`: pries at the hand if it holds the player,
    /// otherwise calls lightning down there
    pub fn strike_at(&mut self, point: Point) {
        match self.phase {
            GamePhase::Paused => {}
            GamePhase::Playing => {
                if !self.hand.poke(point) {
                    self.trigger_strike(point, true);
                }
            }
            GamePhase::Attract | GamePhase::GameOver => {
                self.trigger_strike(point, false);
            }
        }
    }

    /// Random periodic strike, rescheduling the next one
    pub fn trigger_ambient_strike(&mut self) {
        let zone = AMBIENT_STRIKE_ZONE;
        let origin = Point::new(
            self.rng.random_range(zone.left..zone.right),
            self.rng.random_range(zone.top..zone.bottom),
        );
        self.trigger_strike(origin, true);
        let next_ambient = self.next_ambient_time();
        self.lightning.schedule_ambient(next_ambient);
    }

    fn next_ambient_time(&self) -> f64 {
        if self.lightning_period > 0.0 {
            self.clock.now() + self.lightning_period
        } else {
            f64::INFINITY
        }
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
        log::debug!("phase now {:?}", self.phase);
    }

    /// Abandon the running session
    pub fn end_game(&mut self) {
        if self.in_session() {
            self.end_session();
        }
    }

    /// Terminal transition: surfaces the final score
    pub fn end_session(&mut self) {
        self.phase = GamePhase::GameOver;
        self.hand.reset();
        self.player.clutched = false;
        let (score, level) = (self.score.score(), self.level.level_on());
        log::info!("Game over: score {score}, level {}", level + 1);
        self.events.push(GameEvent::SessionEnded { score, level });
    }

    /// Playing or paused
    pub fn in_session(&self) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::Paused)
    }

    /// Take the events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
