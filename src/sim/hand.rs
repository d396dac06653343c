//! The hand that rises out of the lava
//!
//! Idle → Reaching when the player enters the grab zone, Reaching → Grabbing
//! once the hand arrives at the player, Grabbing → Retracting after the dwell
//! time (carrying the player down) or after the player struggles free, and
//! Retracting → Idle back at the rest position. The hand writes the player's
//! `clutched` flag and position; the tick runs it before the player update.

use super::geom::{Point, Rect};
use super::input::TickInput;
use super::player::{Player, PlayerMode};

pub const HAND_WIDTH: i32 = 56;
pub const HAND_HEIGHT: i32 = 57;

/// Parked just below the lava surface, lower left
pub const HAND_REST: Rect = Rect::from_origin(48, 460, HAND_WIDTH, HAND_HEIGHT);
/// Entering this rectangle wakes the hand
pub const GRAB_ZONE: Rect = Rect::new(48, 352, 144, 460);

/// Open and clenched frames on the hand sheet
pub const HAND_FRAMES: [Rect; 2] = [
    Rect::from_origin(0, 0, HAND_WIDTH, HAND_HEIGHT),
    Rect::from_origin(0, HAND_HEIGHT, HAND_WIDTH, HAND_HEIGHT),
];

/// Seconds the hand holds on before pulling the player under
pub const GRAB_DWELL: f64 = 1.5;
/// Flap presses needed to break free
pub const ESCAPE_FLAPS: u32 = 3;
/// Upward velocity on breaking free, subpixels per tick
pub const ESCAPE_IMPULSE: i32 = 128;
pub const RETRACT_SPEED: i32 = 4;

/// Pixels per axis per tick while reaching; later levels are quicker
pub fn reach_speed(level: u32) -> i32 {
    3 + (level / 4) as i32
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandMode {
    Idle,
    Reaching,
    Grabbing { since: f64, struggles: u32 },
    Retracting { carrying: bool },
}

/// Transitions the tick reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandEvent {
    Reaching,
    Grabbed,
    Escaped,
    /// Let go of the player at the rest position
    Released,
}

#[derive(Debug, Clone)]
pub struct Hand {
    pub dest: Rect,
    pub mode: HandMode,
}

impl Default for Hand {
    fn default() -> Self {
        Self {
            dest: HAND_REST,
            mode: HandMode::Idle,
        }
    }
}

impl Hand {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_idle(&self) -> bool {
        self.mode == HandMode::Idle
    }

    pub fn is_grabbing(&self) -> bool {
        matches!(self.mode, HandMode::Grabbing { .. })
    }

    /// Index into `HAND_FRAMES`
    pub fn frame_index(&self) -> usize {
        match self.mode {
            HandMode::Grabbing { .. } | HandMode::Retracting { carrying: true } => 1,
            _ => 0,
        }
    }

    /// Advance one tick
    pub fn update(&mut self, player: &mut Player, input: &TickInput, level: u32, now: f64) -> Option<HandEvent> {
        match self.mode {
            HandMode::Idle => {
                if player.clutched || !player.dest.intersects(&GRAB_ZONE) {
                    return None;
                }
                log::debug!("hand reaching for player at {:?}", player.dest);
                self.mode = HandMode::Reaching;
                Some(HandEvent::Reaching)
            }
            HandMode::Reaching => {
                if !player.dest.intersects(&GRAB_ZONE) {
                    self.mode = HandMode::Retracting { carrying: false };
                    return None;
                }
                let target = grip_rect(player);
                self.dest = step_toward(self.dest, target.top_left(), reach_speed(level));
                if self.dest != target {
                    return None;
                }
                player.clutched = true;
                player.mode = PlayerMode::Flying;
                player.h_vel = 0;
                player.v_vel = 0;
                self.mode = HandMode::Grabbing {
                    since: now,
                    struggles: 0,
                };
                log::debug!("hand grabbed player");
                Some(HandEvent::Grabbed)
            }
            HandMode::Grabbing { since, struggles } => {
                let struggles = struggles + u32::from(input.flap_pressed());
                if struggles >= ESCAPE_FLAPS {
                    release(player);
                    player.v_vel = -ESCAPE_IMPULSE;
                    self.mode = HandMode::Retracting { carrying: false };
                    log::debug!("player broke free of the hand");
                    return Some(HandEvent::Escaped);
                }
                self.mode = if now - since >= GRAB_DWELL {
                    HandMode::Retracting { carrying: true }
                } else {
                    HandMode::Grabbing { since, struggles }
                };
                None
            }
            HandMode::Retracting { carrying } => {
                self.dest = step_toward(self.dest, HAND_REST.top_left(), RETRACT_SPEED);
                if carrying {
                    follow_grip(player, &self.dest);
                }
                if self.dest != HAND_REST {
                    return None;
                }
                self.mode = HandMode::Idle;
                if carrying {
                    release(player);
                    return Some(HandEvent::Released);
                }
                None
            }
        }
    }

    /// Mouse click on the clenched hand pries it open on the next update.
    ///
    /// Returns true if the click was consumed.
    pub fn poke(&mut self, point: Point) -> bool {
        match self.mode {
            HandMode::Grabbing { since, .. } if self.dest.contains(point) => {
                self.mode = HandMode::Grabbing {
                    since,
                    struggles: ESCAPE_FLAPS,
                };
                true
            }
            _ => false,
        }
    }
}

/// Offset of the hand from the player's top-left corner while holding on
fn grip_offset(facing_right: bool) -> (i32, i32) {
    (if facing_right { 3 } else { 21 }, 29)
}

fn grip_rect(player: &Player) -> Rect {
    let (dh, dv) = grip_offset(player.facing_right);
    Rect::from_origin(player.dest.left + dh, player.dest.top + dv, HAND_WIDTH, HAND_HEIGHT)
}

fn follow_grip(player: &mut Player, hand: &Rect) {
    let (dh, dv) = grip_offset(player.facing_right);
    player.place_at(hand.left - dh, hand.top - dv);
}

fn release(player: &mut Player) {
    player.clutched = false;
    player.mode = PlayerMode::Flying;
    player.h_vel = 0;
    player.v_vel = 0;
}

/// Move `rect` toward `target` by at most `speed` pixels on each axis
fn step_toward(rect: Rect, target: Point, speed: i32) -> Rect {
    let dh = (target.x - rect.left).clamp(-speed, speed);
    let dv = (target.y - rect.top).clamp(-speed, speed);
    rect.offset(dh, dv)
}
