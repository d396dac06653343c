//! Sound effect routing
//!
//! The game decides which effect to play and how loud; a `SoundPlayer`
//! backend does the actual playback. Playback is fire-and-forget.

use std::cell::RefCell;
use std::rc::Rc;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Wing beat
    Flap,
    /// Feet down on a ledge
    Land,
    /// Head against a ledge underside
    Bonk,
    /// Lightning bolt
    Strike,
    /// The hand closes
    Grab,
    /// Broke free of the hand
    Escape,
    /// Life lost
    Death,
    GameOver,
    Score,
    /// Level laid out
    LevelStart,
}

impl SoundEffect {
    /// Sound resource number, as a host sound bank indexes them
    pub fn id(self) -> u32 {
        match self {
            SoundEffect::Flap => 1,
            SoundEffect::Land => 2,
            SoundEffect::Bonk => 3,
            SoundEffect::Strike => 4,
            SoundEffect::Grab => 5,
            SoundEffect::Escape => 6,
            SoundEffect::Death => 7,
            SoundEffect::GameOver => 8,
            SoundEffect::Score => 9,
            SoundEffect::LevelStart => 10,
        }
    }

    /// Effect for a simulation event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<SoundEffect> {
        Some(match event {
            GameEvent::Flapped => SoundEffect::Flap,
            GameEvent::Landed { .. } => SoundEffect::Land,
            GameEvent::Bonked => SoundEffect::Bonk,
            GameEvent::LightningStrike { .. } => SoundEffect::Strike,
            GameEvent::Grabbed => SoundEffect::Grab,
            GameEvent::Escaped => SoundEffect::Escape,
            GameEvent::LifeLost { .. } => SoundEffect::Death,
            GameEvent::SessionEnded { .. } => SoundEffect::GameOver,
            GameEvent::ScoreChanged { .. } => SoundEffect::Score,
            GameEvent::LevelStarted { .. } => SoundEffect::LevelStart,
            GameEvent::Wrapped | GameEvent::HandReaching | GameEvent::Released => return None,
        })
    }
}

/// Playback backend
pub trait SoundPlayer {
    /// Start playing `effect` at `volume` (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that discards everything
#[derive(Debug, Default)]
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Backend that remembers what it was asked to play; clones share the log
#[derive(Debug, Clone, Default)]
pub struct RecordingPlayer {
    played: Rc<RefCell<Vec<(SoundEffect, f32)>>>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<(SoundEffect, f32)> {
        self.played.borrow().clone()
    }

    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played.borrow().iter().filter(|(e, _)| *e == effect).count()
    }
}

impl SoundPlayer for RecordingPlayer {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played.borrow_mut().push((effect, volume));
    }
}

/// Audio manager for the game
pub struct AudioManager {
    player: Box<dyn SoundPlayer>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(SilentPlayer))
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("master_volume", &self.master_volume)
            .field("sfx_volume", &self.sfx_volume)
            .field("muted", &self.muted)
            .finish_non_exhaustive()
    }
}

impl AudioManager {
    pub fn new(player: Box<dyn SoundPlayer>) -> Self {
        Self {
            player,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings, player: Box<dyn SoundPlayer>) -> Self {
        let mut audio = Self::new(player);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    pub fn set_player(&mut self, player: Box<dyn SoundPlayer>) {
        self.player = player;
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.player.play(effect, vol);
    }

    /// Play the sounds for a tick's events
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}
