//! Fixed timestep simulation tick
//!
//! One call advances the game by one tick. Order within a tick: queued
//! points, periodic lightning, hand, player (steer, integrate, collision
//! passes), lightning bolt and hit test, life loss, animation.

use super::collision::{self, LethalContact, PlatformContact};
use super::events::{DeathCause, GameEvent};
use super::hand::HandEvent;
use super::input::TickInput;
use super::level::LifeOutcome;
use super::state::{GamePhase, GameState};

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if !std::mem::take(&mut state.keep_digit_changes) {
        state.score.clear_changes();
    }

    match state.phase {
        GamePhase::Paused => return,
        GamePhase::Attract | GamePhase::GameOver => {
            // Cosmetic: flames flicker and mouse strikes still flash
            state.clock.advance(&mut state.rng);
            let now = state.clock.now();
            state.lightning.update(now, &mut state.rng);
            return;
        }
        GamePhase::Playing => {}
    }

    state.clock.advance(&mut state.rng);
    let now = state.clock.now();

    apply_pending_points(state);

    if state.lightning.ambient_due(now) {
        state.trigger_ambient_strike();
    }

    update_hand(state, input, now);

    let death = update_player(state, input).or_else(|| update_lightning(state, now));
    if let Some(cause) = death {
        lose_life(state, cause);
    }

    let even_frame = state.clock.even_frame();
    state.player.animate(even_frame);
}

fn apply_pending_points(state: &mut GameState) {
    let points = std::mem::take(&mut state.pending_points);
    if points > 0 {
        let score = state.score.add(points);
        state.events.push(GameEvent::ScoreChanged { score });
    }
}

fn update_hand(state: &mut GameState, input: &TickInput, now: f64) {
    let level = state.level.level_on();
    let event = state.hand.update(&mut state.player, input, level, now);
    if let Some(event) = event {
        state.events.push(match event {
            HandEvent::Reaching => GameEvent::HandReaching,
            HandEvent::Grabbed => GameEvent::Grabbed,
            HandEvent::Escaped => GameEvent::Escaped,
            HandEvent::Released => GameEvent::Released,
        });
    }
}

/// Steer, integrate and run the collision passes. Returns a lethal contact.
fn update_player(state: &mut GameState, input: &TickInput) -> Option<DeathCause> {
    let player = &mut state.player;
    player.snapshot();
    if player.clutched {
        return None;
    }

    if player.steer(input) {
        state.events.push(GameEvent::Flapped);
    }
    player.integrate();

    let geometry = state.level.geometry();
    match collision::resolve_platforms(player, geometry) {
        Some(PlatformContact::Landed { ledge, touch_down }) => {
            state.events.push(GameEvent::Landed { ledge, touch_down });
        }
        Some(PlatformContact::Bonked { .. }) => state.events.push(GameEvent::Bonked),
        Some(PlatformContact::WalkedOff) | None => {}
    }

    let lethal = collision::check_lava_roof(player, geometry);

    if collision::wrap_around(player) {
        state.events.push(GameEvent::Wrapped);
    }

    lethal.map(|contact| match contact {
        LethalContact::Lava => DeathCause::Lava,
        LethalContact::Roof => DeathCause::Roof,
    })
}

/// Generate the next bolt when due and test it against the player
fn update_lightning(state: &mut GameState, now: f64) -> Option<DeathCause> {
    if !state.lightning.update(now, &mut state.rng) {
        return None;
    }
    let hit = state.lightning.is_lethal() && !state.player.clutched && state.lightning.hits(&state.player.dest);
    hit.then_some(DeathCause::Lightning)
}

fn lose_life(state: &mut GameState, cause: DeathCause) {
    match state.level.lose_life() {
        LifeOutcome::Respawn { lives_left } => {
            log::debug!("life lost to {cause:?}, {lives_left} left");
            state.events.push(GameEvent::LifeLost { cause, lives_left });
            state.set_up_level();
        }
        LifeOutcome::SessionEnded => {
            state.events.push(GameEvent::LifeLost { cause, lives_left: 0 });
            state.score.set_lives(0);
            state.end_session();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::to_subpixels;
    use crate::sim::geom::Point;
    use crate::sim::hand::HandMode;
    use crate::sim::input::{GameKey, KeyMask};
    use crate::sim::player::PlayerMode;
    use proptest::prelude::*;

    fn playing(settings: Settings) -> GameState {
        let mut state = GameState::new(&settings);
        state.new_game();
        state.drain_events();
        state
    }

    fn run(state: &mut GameState, input: &TickInput, ticks: usize) -> Vec<GameEvent> {
        for _ in 0..ticks {
            tick(state, input);
        }
        state.drain_events()
    }

    fn lives_lost(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::LifeLost { .. }))
            .count()
    }

    fn flap() -> TickInput {
        let keys = KeyMask::from_keys(&[GameKey::Spacebar]);
        TickInput {
            held: keys,
            pressed: keys,
        }
    }

    /// Player hanging just above the lava at the right, dropping
    fn drop_into_lava(state: &mut GameState) {
        let player = &mut state.player;
        player.mode = PlayerMode::Flying;
        player.place_at(560, LAVA_TOP - PLAYER_HEIGHT - 1);
        player.v_vel = to_subpixels(4);
    }

    #[test]
    fn test_attract_ignores_input() {
        let mut state = GameState::new(&Settings::default());
        let start = state.player.dest;
        run(&mut state, &flap(), 10);
        assert_eq!(state.player.dest, start);
        assert_eq!(state.clock.ticks(), 10);
    }

    #[test]
    fn test_flap_lifts_player_off_dais() {
        let mut state = playing(Settings::default());
        let start = state.player.dest;

        tick(&mut state, &flap());
        let events = state.drain_events();

        assert!(events.contains(&GameEvent::Flapped));
        assert!(state.player.is_flying());
        assert!(state.player.v_vel < 0);
        assert!(state.player.dest.top < start.top);
    }

    #[test]
    fn test_idle_player_stays_put() {
        let mut state = playing(Settings::default());
        let start = state.player.dest;

        let events = run(&mut state, &TickInput::default(), 60);

        assert_eq!(state.player.dest, start);
        assert_eq!(state.player.mode, PlayerMode::Idle);
        assert_eq!(lives_lost(&events), 0);
    }

    #[test]
    fn test_falling_player_lands_on_ledge() {
        let mut state = playing(Settings::default());
        state.player.mode = PlayerMode::Flying;
        state.player.place_at(300, 20);

        let mut landed = None;
        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
            landed = state
                .drain_events()
                .into_iter()
                .find(|e| matches!(e, GameEvent::Landed { .. }));
            if landed.is_some() {
                break;
            }
        }

        // Top centre ledge
        assert!(matches!(landed, Some(GameEvent::Landed { ledge: 5, .. })));
        assert_eq!(state.player.dest.bottom, 190);
        assert_eq!(state.player.v_vel, 0);
    }

    #[test]
    fn test_lava_costs_exactly_one_life() {
        let mut state = playing(Settings::default());
        drop_into_lava(&mut state);

        let events = run(&mut state, &TickInput::default(), 10);

        assert_eq!(lives_lost(&events), 1);
        assert!(events.contains(&GameEvent::LifeLost {
            cause: DeathCause::Lava,
            lives_left: STARTING_LIVES - 1
        }));
        assert_eq!(state.level.lives_left(), STARTING_LIVES - 1);
        assert_eq!(state.phase, GamePhase::Playing);
        // Respawned on the dais
        assert_eq!(state.player.dest.bottom, 424);
        assert_eq!(state.score.lives_digits().value(), STARTING_LIVES - 1);
    }

    #[test]
    fn test_last_life_ends_session() {
        let mut state = playing(Settings {
            starting_lives: 1,
            ..Settings::default()
        });
        drop_into_lava(&mut state);

        let events = run(&mut state, &TickInput::default(), 1);
        assert!(events.contains(&GameEvent::SessionEnded { score: 0, level: 0 }));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.level.lives_left(), 0);

        // Nothing moves once the session is over
        let frozen = state.player.clone();
        let events = run(&mut state, &flap(), 30);
        assert!(events.is_empty());
        assert_eq!(state.player.dest, frozen.dest);
        assert_eq!(state.level.lives_left(), 0);
    }

    #[test]
    fn test_flying_into_roof_is_lethal() {
        let mut state = playing(Settings::default());
        state.player.mode = PlayerMode::Flying;
        state.player.place_at(320, 2);
        state.player.v_vel = -to_subpixels(4);

        let events = run(&mut state, &TickInput::default(), 1);
        assert!(events.contains(&GameEvent::LifeLost {
            cause: DeathCause::Roof,
            lives_left: STARTING_LIVES - 1
        }));
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = playing(Settings::default());
        state.toggle_pause();
        let ticks = state.clock.ticks();
        let start = state.player.dest;

        run(&mut state, &flap(), 20);
        assert_eq!(state.clock.ticks(), ticks);
        assert_eq!(state.player.dest, start);

        state.toggle_pause();
        tick(&mut state, &flap());
        assert_ne!(state.player.dest, start);
    }

    #[test]
    fn test_queued_points_applied_in_tick() {
        let mut state = playing(Settings::default());
        state.pending_points += 150;
        let events = run(&mut state, &TickInput::default(), 1);

        assert!(events.contains(&GameEvent::ScoreChanged { score: 150 }));
        assert!(state.score.score_digits().changed(1));
        assert!(state.score.score_digits().changed(2));

        // Flags last one tick
        tick(&mut state, &TickInput::default());
        assert!(!state.score.score_digits().any_changed());
    }

    #[test]
    fn test_lightning_on_player_is_lethal() {
        let mut state = playing(Settings::default());
        // Let the intro burst die down
        run(&mut state, &TickInput::default(), 30);
        assert!(!state.lightning.is_active());

        let dest = state.player.dest;
        state.strike_at(Point::new(dest.left + 10, dest.top + 10));
        let events = run(&mut state, &TickInput::default(), 1);

        assert!(events.contains(&GameEvent::LifeLost {
            cause: DeathCause::Lightning,
            lives_left: STARTING_LIVES - 1
        }));
    }

    #[test]
    fn test_intro_strike_is_harmless() {
        let mut state = playing(Settings::default());
        let events = run(&mut state, &TickInput::default(), 30);
        assert_eq!(lives_lost(&events), 0);
        assert!(state.lightning.total_strikes() > 0);
    }

    #[test]
    fn test_clutched_player_is_not_integrated() {
        let mut state = playing(Settings::default());
        state.player.mode = PlayerMode::Flying;
        state.player.place_at(60, 380);
        state.player.v_vel = 100;
        state.player.clutched = true;
        state.hand.mode = HandMode::Grabbing {
            since: state.clock.now(),
            struggles: 0,
        };
        let start = state.player.dest;

        run(&mut state, &TickInput::default(), 5);
        assert_eq!(state.player.dest, start);
    }

    #[test]
    fn test_periodic_lightning_fires() {
        let mut state = playing(Settings {
            lightning_period_secs: 1.0,
            ..Settings::default()
        });
        let events = run(&mut state, &TickInput::default(), 31);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::LightningStrike { lethal: true, .. }))
        );
    }

    #[test]
    fn test_same_seed_same_run() {
        let settings = Settings {
            seed: Some(42),
            lightning_period_secs: 0.5,
            ..Settings::default()
        };
        let mut a = playing(settings.clone());
        let mut b = playing(settings);
        let inputs = [flap(), TickInput::default(), flap(), TickInput::default()];
        for i in 0..200 {
            tick(&mut a, &inputs[i % inputs.len()]);
            tick(&mut b, &inputs[i % inputs.len()]);
        }
        assert_eq!(a.player.dest, b.player.dest);
        assert_eq!(a.level.lives_left(), b.level.lives_left());
        assert_eq!(a.drain_events(), b.drain_events());
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_wrap_bounds(masks in prop::collection::vec(any::<u8>(), 1..300)) {
            let mut state = playing(Settings::default());
            let mut previous = KeyMask::EMPTY;
            let mut lives = state.level.lives_left();
            for bits in masks {
                let held = KeyMask(bits);
                let input = TickInput {
                    held,
                    pressed: KeyMask(bits & !previous.0),
                };
                previous = held;
                tick(&mut state, &input);

                let dest = state.player.dest;
                prop_assert!(dest.left >= 0 && dest.left < SCREEN_WIDTH);
                prop_assert!(state.level.lives_left() <= lives);
                lives = state.level.lives_left();
            }
        }
    }
}
