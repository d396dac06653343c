//! Host-facing game facade
//!
//! The host shell owns the window and timer. It calls `update()` at
//! `update_frequency()` Hz, `draw()` from its paint cycle, and forwards key
//! and mouse events as they arrive. Nothing here blocks.

use crate::audio::{AudioManager, SilentPlayer, SoundPlayer};
use crate::highscores::HighScores;
use crate::renderer::{Renderer, draw_scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameKey, GamePhase, GameState, InputMapper, Point, tick};

#[derive(Debug)]
pub struct Game {
    state: GameState,
    settings: Settings,
    input: InputMapper,
    audio: AudioManager,
    high_scores: HighScores,
    /// Events of the most recent update
    events: Vec<GameEvent>,
}

impl Game {
    /// Invalid settings are replaced by the defaults, keeping the seed
    pub fn new(settings: Settings) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(err) => {
                log::warn!("{err}; using default settings");
                Settings {
                    seed: settings.seed,
                    ..Settings::default()
                }
            }
        };
        let audio = AudioManager::from_settings(&settings, Box::new(SilentPlayer));
        Self {
            state: GameState::new(&settings),
            settings,
            input: InputMapper::new(),
            audio,
            high_scores: HighScores::new(),
            events: Vec::new(),
        }
    }

    /// Route sounds to `player`
    pub fn with_sound_player(mut self, player: Box<dyn SoundPlayer>) -> Self {
        self.audio.set_player(player);
        self
    }

    /// Desired tick rate in Hz
    pub fn update_frequency(&self) -> f64 {
        self.settings.update_frequency
    }

    /// Advance one tick. Returns what happened, including anything caused by
    /// host calls since the previous update.
    pub fn update(&mut self) -> &[GameEvent] {
        let input = self.input.latch();
        tick(&mut self.state, &input);
        self.events = self.state.drain_events();

        self.audio.play_events(&self.events);
        for event in &self.events {
            if let GameEvent::SessionEnded { score, level } = *event {
                self.high_scores.add_score(score, level + 1);
            }
        }
        &self.events
    }

    /// Render the latest committed state
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        draw_scene(&self.state, renderer);
    }

    pub fn handle_mouse_down_event(&mut self, point: Point) {
        self.state.strike_at(point);
    }

    pub fn handle_key_down_event(&mut self, key: GameKey) {
        self.input.key_down(key);
    }

    pub fn handle_key_up_event(&mut self, key: GameKey) {
        self.input.key_up(key);
    }

    /// Raw key code from the platform; codes outside the key set are ignored
    pub fn handle_raw_key(&mut self, code: u32, down: bool) {
        match GameKey::try_from(code) {
            Ok(key) if down => self.input.key_down(key),
            Ok(key) => self.input.key_up(key),
            Err(err) => log::debug!("ignoring key event: {err}"),
        }
    }

    pub fn new_game(&mut self) {
        self.input.clear();
        self.state.new_game();
    }

    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
    }

    pub fn end_game(&mut self) {
        self.state.end_game();
    }

    /// Queue points; they land on the next update
    pub fn add_score(&mut self, points: u32) {
        if self.state.in_session() {
            self.state.pending_points = self.state.pending_points.saturating_add(points);
        }
    }

    pub fn next_level(&mut self) {
        self.state.next_level();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn reset_high_scores(&mut self) {
        self.high_scores.clear();
    }
}
