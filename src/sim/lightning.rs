//! Procedural lightning hazard
//!
//! A strike forks from its origin into two branches, one running to each
//! obelisk tip. Each branch is exactly `NUM_LIGHTNING_PTS` points: the
//! origin, jittered interior points at a fixed vertical step, and the anchor.
//! A burst regenerates the bolt `STRIKES_PER_BURST` times.

use rand::Rng;

use super::geom::{Point, Rect};

pub const NUM_LIGHTNING_PTS: usize = 8;

/// Tip of the left obelisk; end point of the left branch
pub const LEFT_OBELISK: Point = Point::new(172, 250);
/// Tip of the right obelisk; end point of the right branch
pub const RIGHT_OBELISK: Point = Point::new(468, 250);

/// Maximum horizontal jitter of interior points, pixels
pub const WANDER: i32 = 16;
pub const STRIKES_PER_BURST: u32 = 5;
/// Seconds between bolts of one burst
pub const STRIKE_INTERVAL: f64 = 0.1;
/// Seconds a bolt stays on screen after generation
pub const FLASH_DURATION: f64 = 0.1;

/// Slack for comparing tick-derived times
const TIME_EPSILON: f64 = 1e-9;

/// Where the new-game strike lands: on the central dais
pub const INTRO_STRIKE: Point = Point::new(320, 429);

pub type Branch = [Point; NUM_LIGHTNING_PTS];

#[derive(Debug, Clone)]
pub struct Lightning {
    origin: Point,
    left: Branch,
    right: Branch,
    /// Bolts still to generate in the current burst
    strikes_left: u32,
    last_strike: f64,
    /// Whether the current burst can hit the player
    lethal: bool,
    visible_until: f64,
    /// Bolts generated since the last reset
    total_strikes: u64,
    /// Time of the next periodic burst
    next_ambient: f64,
}

impl Default for Lightning {
    fn default() -> Self {
        Self {
            origin: INTRO_STRIKE,
            left: [LEFT_OBELISK; NUM_LIGHTNING_PTS],
            right: [RIGHT_OBELISK; NUM_LIGHTNING_PTS],
            strikes_left: 0,
            last_strike: f64::NEG_INFINITY,
            lethal: false,
            visible_until: f64::NEG_INFINITY,
            total_strikes: 0,
            next_ambient: f64::INFINITY,
        }
    }
}

impl Lightning {
    /// Cancel any burst and schedule the next periodic one
    pub fn reset(&mut self, next_ambient: f64) {
        *self = Self {
            next_ambient,
            ..Self::default()
        };
    }

    /// Start a burst at `origin`. Ignored while a burst is already running.
    ///
    /// Returns true if a burst was started.
    pub fn trigger(&mut self, origin: Point, now: f64, lethal: bool) -> bool {
        if self.is_active() {
            log::debug!("lightning at {origin} ignored, burst in progress");
            return false;
        }
        self.origin = origin;
        self.lethal = lethal;
        self.strikes_left = STRIKES_PER_BURST;
        // First bolt is due on the next update
        self.last_strike = now - STRIKE_INTERVAL;
        true
    }

    /// Generate the next bolt of the burst when due.
    ///
    /// Returns true if a new bolt was generated this call.
    pub fn update<R: Rng>(&mut self, now: f64, rng: &mut R) -> bool {
        if self.strikes_left == 0 || now - self.last_strike < STRIKE_INTERVAL - TIME_EPSILON {
            return false;
        }
        self.generate(rng);
        self.strikes_left -= 1;
        self.last_strike = now;
        self.visible_until = now + FLASH_DURATION;
        self.total_strikes += 1;
        true
    }

    /// Overwrite both branches with a fresh bolt from the current origin
    pub fn generate<R: Rng>(&mut self, rng: &mut R) {
        fill_branch(&mut self.left, self.origin, LEFT_OBELISK, rng);
        fill_branch(&mut self.right, self.origin, RIGHT_OBELISK, rng);
    }

    /// True if any segment of either branch touches `rect`
    pub fn hits(&self, rect: &Rect) -> bool {
        [&self.left, &self.right]
            .into_iter()
            .any(|branch| branch.windows(2).any(|seg| rect.intersects_segment(seg[0], seg[1])))
    }

    /// Periodic burst is due
    pub fn ambient_due(&self, now: f64) -> bool {
        now >= self.next_ambient
    }

    pub fn schedule_ambient(&mut self, at: f64) {
        self.next_ambient = at;
    }

    pub fn is_active(&self) -> bool {
        self.strikes_left > 0
    }

    pub fn is_visible(&self, now: f64) -> bool {
        now < self.visible_until
    }

    pub fn is_lethal(&self) -> bool {
        self.lethal
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn left(&self) -> &Branch {
        &self.left
    }

    pub fn right(&self) -> &Branch {
        &self.right
    }

    pub fn total_strikes(&self) -> u64 {
        self.total_strikes
    }
}

/// Walk from `from` to `to` in equal vertical steps, jittering every point
/// except the two ends
fn fill_branch<R: Rng>(branch: &mut Branch, from: Point, to: Point, rng: &mut R) {
    let last = (NUM_LIGHTNING_PTS - 1) as i32;
    for (i, point) in branch.iter_mut().enumerate() {
        let i = i as i32;
        let h = from.x + (to.x - from.x) * i / last;
        let v = from.y + (to.y - from.y) * i / last;
        let jitter = if i == 0 || i == last {
            0
        } else {
            rng.random_range(-WANDER..=WANDER)
        };
        *point = Point::new(h + jitter, v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn burst_at(origin: Point) -> (Lightning, Pcg32) {
        let mut lightning = Lightning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        assert!(lightning.trigger(origin, 1.0, true));
        assert!(lightning.update(1.0, &mut rng));
        (lightning, rng)
    }

    #[test]
    fn test_branches_run_origin_to_obelisks() {
        let origin = Point::new(300, 60);
        let (lightning, _) = burst_at(origin);

        assert_eq!(lightning.left()[0], origin);
        assert_eq!(lightning.right()[0], origin);
        assert_eq!(lightning.left()[NUM_LIGHTNING_PTS - 1], LEFT_OBELISK);
        assert_eq!(lightning.right()[NUM_LIGHTNING_PTS - 1], RIGHT_OBELISK);
    }

    #[test]
    fn test_burst_paces_bolts() {
        let (mut lightning, mut rng) = burst_at(Point::new(320, 100));
        // Too soon for the second bolt
        assert!(!lightning.update(1.05, &mut rng));
        for n in 1..STRIKES_PER_BURST {
            assert!(lightning.update(1.0 + n as f64 * STRIKE_INTERVAL, &mut rng));
        }
        assert!(!lightning.is_active());
        assert!(!lightning.update(10.0, &mut rng));
        assert_eq!(lightning.total_strikes(), STRIKES_PER_BURST as u64);
    }

    #[test]
    fn test_retrigger_during_burst_is_ignored() {
        let (mut lightning, _) = burst_at(Point::new(320, 100));
        assert!(!lightning.trigger(Point::new(10, 10), 1.02, false));
        assert_eq!(lightning.origin(), Point::new(320, 100));
        assert!(lightning.is_lethal());
    }

    #[test]
    fn test_bolt_flash_expires() {
        let (lightning, _) = burst_at(Point::new(320, 100));
        assert!(lightning.is_visible(1.05));
        assert!(!lightning.is_visible(1.0 + FLASH_DURATION));
    }

    #[test]
    fn test_hits_player_under_origin() {
        let (lightning, _) = burst_at(Point::new(320, 100));
        // The origin point itself lies inside this rectangle
        assert!(lightning.hits(&Rect::from_origin(300, 80, 48, 37)));
        // Far corner, nowhere near either branch
        assert!(!lightning.hits(&Rect::from_origin(560, 400, 48, 37)));
    }

    #[test]
    fn test_reset_cancels_burst() {
        let (mut lightning, _) = burst_at(Point::new(320, 100));
        lightning.reset(12.0);
        assert!(!lightning.is_active());
        assert!(!lightning.is_visible(1.0));
        assert!(lightning.ambient_due(12.0));
        assert!(!lightning.ambient_due(11.9));
    }

    proptest! {
        #[test]
        fn prop_interior_points_stay_within_wander(
            seed in any::<u64>(),
            h in 0i32..640,
            v in 0i32..460,
        ) {
            let mut lightning = Lightning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let origin = Point::new(h, v);
            lightning.trigger(origin, 0.0, false);
            lightning.update(0.0, &mut rng);

            for (branch, anchor) in [(lightning.left(), LEFT_OBELISK), (lightning.right(), RIGHT_OBELISK)] {
                prop_assert_eq!(branch.len(), NUM_LIGHTNING_PTS);
                let mut prev_v = branch[0].y;
                for (i, point) in branch.iter().enumerate() {
                    let i = i as i32;
                    let last = (NUM_LIGHTNING_PTS - 1) as i32;
                    let line_h = origin.x + (anchor.x - origin.x) * i / last;
                    prop_assert!((point.x - line_h).abs() <= WANDER);
                    // Monotone vertical progress toward the anchor
                    if anchor.y >= origin.y {
                        prop_assert!(point.y >= prev_v);
                    } else {
                        prop_assert!(point.y <= prev_v);
                    }
                    prev_v = point.y;
                }
            }
        }
    }
}
