//! Player state and per-tick movement rules
//!
//! Position and velocity are in subpixels (see `consts::SUBPIXEL_SHIFT`);
//! `dest` is the pixel rectangle derived from them.

use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::input::TickInput;
use crate::consts::*;
use crate::{to_pixels, to_subpixels};

/// Primary movement mode. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerMode {
    /// Standing on a ledge
    Idle,
    /// Moving along a ledge
    Walking,
    /// Airborne, flapping or falling
    Flying,
}

/// Sprite frames on the player sheet, one 48x37 cell per row:
/// flying right 0-1, flying left 2-3, walking right 4-5, walking left 6-7,
/// idle right 8, idle left 9, clutched 10
pub const NUM_PLAYER_FRAMES: usize = 11;

pub const PLAYER_FRAMES: [Rect; NUM_PLAYER_FRAMES] = {
    let mut frames = [Rect::ZERO; NUM_PLAYER_FRAMES];
    let mut i = 0;
    while i < NUM_PLAYER_FRAMES {
        frames[i] = Rect::from_origin(0, i as i32 * PLAYER_HEIGHT, PLAYER_WIDTH, PLAYER_HEIGHT);
        i += 1;
    }
    frames
};

const CLUTCHED_FRAME: usize = 10;

/// Where a fresh player stands: centred on the central dais
pub const SPAWN_H: i32 = 295;
pub const SPAWN_V: i32 = 424 - PLAYER_HEIGHT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub dest: Rect,
    /// `dest` at the start of the current tick
    pub prev_dest: Rect,
    pub h: i32,
    pub v: i32,
    pub prev_h: i32,
    pub prev_v: i32,
    pub h_vel: i32,
    pub v_vel: i32,
    pub mode: PlayerMode,
    /// Walk cycle / wing frame toggle
    pub frame: usize,
    pub facing_right: bool,
    /// A flap impulse was applied this tick (wings down)
    pub wing_stroke: bool,
    /// Teleported across the wrap seam this tick
    pub wrapped: bool,
    /// Held by the hand; physics suspended
    pub clutched: bool,
}

impl Default for Player {
    fn default() -> Self {
        let mut player = Self {
            dest: Rect::ZERO,
            prev_dest: Rect::ZERO,
            h: 0,
            v: 0,
            prev_h: 0,
            prev_v: 0,
            h_vel: 0,
            v_vel: 0,
            mode: PlayerMode::Idle,
            frame: 0,
            facing_right: true,
            wing_stroke: false,
            wrapped: false,
            clutched: false,
        };
        player.reset();
        player
    }
}

impl Player {
    /// Place the player on the central dais, at rest
    pub fn reset(&mut self) {
        self.h = to_subpixels(SPAWN_H);
        self.v = to_subpixels(SPAWN_V);
        self.h_vel = 0;
        self.v_vel = 0;
        self.mode = PlayerMode::Idle;
        self.frame = 0;
        self.facing_right = true;
        self.wing_stroke = false;
        self.wrapped = false;
        self.clutched = false;
        self.sync_dest();
        self.snapshot();
    }

    /// Record the start-of-tick position for swept collision tests
    pub fn snapshot(&mut self) {
        self.prev_h = self.h;
        self.prev_v = self.v;
        self.prev_dest = self.dest;
        self.wing_stroke = false;
        self.wrapped = false;
    }

    /// Rebuild `dest` from the subpixel position
    pub fn sync_dest(&mut self) {
        self.dest = Rect::from_origin(to_pixels(self.h), to_pixels(self.v), PLAYER_WIDTH, PLAYER_HEIGHT);
    }

    /// Move so that `dest` has its top-left corner at the given pixel position
    pub fn place_at(&mut self, left: i32, top: i32) {
        self.h = to_subpixels(left);
        self.v = to_subpixels(top);
        self.sync_dest();
    }

    pub fn is_grounded(&self) -> bool {
        matches!(self.mode, PlayerMode::Idle | PlayerMode::Walking)
    }

    pub fn is_walking(&self) -> bool {
        self.mode == PlayerMode::Walking
    }

    pub fn is_flying(&self) -> bool {
        self.mode == PlayerMode::Flying
    }

    /// Apply one tick of input to mode and velocity.
    ///
    /// Returns true if a flap impulse started this tick.
    pub fn steer(&mut self, input: &TickInput) -> bool {
        let dir = input.direction();
        let dir_pressed = input.direction_pressed();
        if dir_pressed != 0 {
            self.facing_right = dir_pressed > 0;
        }

        if input.flap_held() || input.flap_pressed() {
            self.mode = PlayerMode::Flying;
            let started = input.flap_pressed();
            let thrust = if started { FLAP_IMPULSE } else { FLAP_THRUST };
            self.v_vel = (self.v_vel - thrust).max(-MAX_V_VELOCITY);
            self.wing_stroke = started;
            self.glide(dir);
            return started;
        }

        match self.mode {
            PlayerMode::Flying => {
                self.v_vel = (self.v_vel + GRAVITY).min(MAX_V_VELOCITY);
                self.glide(dir);
            }
            PlayerMode::Idle | PlayerMode::Walking => {
                if dir != 0 {
                    self.mode = PlayerMode::Walking;
                    self.facing_right = dir > 0;
                    self.h_vel = dir * WALK_SPEED;
                } else {
                    self.mode = PlayerMode::Idle;
                    self.h_vel = approach_zero(self.h_vel, IDLE_DECAY);
                }
                self.v_vel = 0;
            }
        }
        false
    }

    /// Airborne horizontal control: nudge toward the held direction, else drag
    fn glide(&mut self, dir: i32) {
        if dir != 0 {
            self.h_vel = (self.h_vel + dir * GLIDE_IMPULSE).clamp(-MAX_H_VELOCITY, MAX_H_VELOCITY);
        } else {
            self.h_vel = approach_zero(self.h_vel, AIR_RESISTANCE);
        }
    }

    /// `position += velocity`, then refresh `dest`
    pub fn integrate(&mut self) {
        self.h += self.h_vel;
        self.v += self.v_vel;
        self.sync_dest();
    }

    /// Rest on a surface whose top edge is at pixel row `surface_top`
    pub fn land_on(&mut self, surface_top: i32) {
        self.v = to_subpixels(surface_top - PLAYER_HEIGHT);
        self.v_vel = 0;
        self.mode = if self.h_vel != 0 {
            PlayerMode::Walking
        } else {
            PlayerMode::Idle
        };
        self.sync_dest();
    }

    /// Start falling from the current position
    pub fn start_falling(&mut self) {
        self.mode = PlayerMode::Flying;
        self.v_vel = 0;
    }

    /// Advance the walk cycle; throttled to even frames
    pub fn animate(&mut self, even_frame: bool) {
        if !even_frame {
            return;
        }
        self.frame = if self.is_walking() { (self.frame + 1) % 2 } else { 0 };
    }

    /// Index into `PLAYER_FRAMES` for the current pose
    pub fn sprite_index(&self) -> usize {
        if self.clutched {
            return CLUTCHED_FRAME;
        }
        let left = usize::from(!self.facing_right);
        match self.mode {
            PlayerMode::Flying => left * 2 + usize::from(self.wing_stroke),
            PlayerMode::Walking => 4 + left * 2 + self.frame,
            PlayerMode::Idle => 8 + left,
        }
    }

    /// Second copy of the sprite while straddling the right screen edge
    pub fn ghost(&self) -> Option<Rect> {
        (self.dest.right > SCREEN_WIDTH).then(|| self.dest.offset(-SCREEN_WIDTH, 0))
    }
}

fn approach_zero(value: i32, step: i32) -> i32 {
    if value > 0 {
        (value - step).max(0)
    } else {
        (value + step).min(0)
    }
}
