//! Collision detection and response for the player
//!
//! Three passes per tick, in order: ledges and touch-down zones (swept along
//! the motion segment from `prev_dest` to `dest`), lava and roof, then the
//! horizontal wrap. Horizontal tests run on the wrap cylinder, so a ledge that
//! hangs off one screen edge is also under a player standing near the other.

use super::geom::Rect;
use super::level::LevelGeometry;
use super::player::Player;
use crate::consts::*;
use crate::{to_pixels, to_subpixels, wrap_coord};

/// Result of the ledge pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformContact {
    /// Came to rest on ledge `ledge`; `touch_down` if caught by its landing strip
    Landed { ledge: usize, touch_down: bool },
    /// Head hit the underside of ledge `ledge`
    Bonked { ledge: usize },
    /// Walked or drifted off the end of a ledge
    WalkedOff,
}

/// Lethal contact found by the lava/roof pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LethalContact {
    Lava,
    Roof,
}

const WRAP_SHIFTS: [i32; 3] = [0, -SCREEN_WIDTH, SCREEN_WIDTH];

/// Horizontal spans overlap somewhere on the wrap cylinder
pub fn spans_overlap_wrapped(a: &Rect, b: &Rect) -> bool {
    WRAP_SHIFTS
        .iter()
        .any(|&dh| a.offset(dh, 0).overlaps_horizontally(b))
}

/// Rectangles intersect somewhere on the wrap cylinder
pub fn intersects_wrapped(a: &Rect, b: &Rect) -> bool {
    WRAP_SHIFTS.iter().any(|&dh| a.offset(dh, 0).intersects(b))
}

/// Candidate surface found along the motion segment
#[derive(Debug, Clone, Copy)]
struct Crossing {
    /// Row first reached along the direction of travel
    entry: i32,
    /// Row the player ends up resting on (or under)
    surface: i32,
    ledge: usize,
    touch_down: bool,
}

/// Platform/touch-down pass
pub fn resolve_platforms(player: &mut Player, geometry: &LevelGeometry) -> Option<PlatformContact> {
    if player.is_grounded() {
        return check_support(player, geometry);
    }

    let prev = player.prev_dest;
    let dest = player.dest;

    if dest.bottom > prev.bottom {
        let landing = nearest_landing(&prev, &dest, geometry)?;
        player.land_on(landing.surface);
        return Some(PlatformContact::Landed {
            ledge: landing.ledge,
            touch_down: landing.touch_down,
        });
    }

    if dest.top < prev.top {
        let (index, ledge) = geometry
            .ledges
            .as_slice()
            .iter()
            .enumerate()
            .filter(|(_, ledge)| {
                prev.top >= ledge.bottom && dest.top < ledge.bottom && spans_overlap_wrapped(&dest, ledge)
            })
            .max_by_key(|(_, ledge)| ledge.bottom)?;
        player.v = to_subpixels(ledge.bottom);
        player.v_vel = -player.v_vel / 2;
        player.sync_dest();
        return Some(PlatformContact::Bonked { ledge: index });
    }

    None
}

/// The surface whose entry row the feet cross first while falling.
/// Touch-down strips win ties against bare ledges.
fn nearest_landing(prev: &Rect, dest: &Rect, geometry: &LevelGeometry) -> Option<Crossing> {
    let zones = geometry
        .touch_downs
        .as_slice()
        .iter()
        .enumerate()
        .filter(|(_, zone)| {
            prev.bottom <= zone.bottom && dest.bottom > zone.top && spans_overlap_wrapped(dest, zone)
        })
        .map(|(ledge, zone)| Crossing {
            entry: zone.top.max(prev.bottom),
            surface: zone.bottom,
            ledge,
            touch_down: true,
        });

    let ledges = geometry
        .ledges
        .as_slice()
        .iter()
        .enumerate()
        .filter(|(_, ledge)| {
            prev.bottom <= ledge.top && dest.bottom >= ledge.top && spans_overlap_wrapped(dest, ledge)
        })
        .map(|(ledge, rect)| Crossing {
            entry: rect.top,
            surface: rect.top,
            ledge,
            touch_down: false,
        });

    zones
        .chain(ledges)
        .min_by_key(|c| (c.entry, !c.touch_down))
}

/// A grounded player must have a ledge directly under their feet
fn check_support(player: &mut Player, geometry: &LevelGeometry) -> Option<PlatformContact> {
    let dest = player.dest;
    let supported = geometry
        .ledges
        .as_slice()
        .iter()
        .any(|ledge| ledge.top == dest.bottom && spans_overlap_wrapped(&dest, ledge));
    if supported {
        None
    } else {
        player.start_falling();
        Some(PlatformContact::WalkedOff)
    }
}

/// Lava/roof pass
pub fn check_lava_roof(player: &Player, geometry: &LevelGeometry) -> Option<LethalContact> {
    if player.dest.top < ROOF_LINE {
        return Some(LethalContact::Roof);
    }
    geometry
        .hazards
        .as_slice()
        .iter()
        .any(|hazard| intersects_wrapped(&player.dest, hazard))
        .then_some(LethalContact::Lava)
}

/// Wrap-around pass. Keeps `dest.left` in `[0, SCREEN_WIDTH)`; returns true
/// if the player was teleported across the seam this tick.
pub fn wrap_around(player: &mut Player) -> bool {
    let wrap_width = to_subpixels(SCREEN_WIDTH);
    let wrapped_h = wrap_coord(player.h, wrap_width);
    if wrapped_h == player.h {
        return false;
    }

    let shift = wrapped_h - player.h;
    player.h = wrapped_h;
    player.prev_h += shift;
    player.prev_dest = player.prev_dest.offset(to_pixels(shift), 0);
    player.sync_dest();
    player.wrapped = true;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::touch_down_zone;
    use crate::sim::player::PlayerMode;
    use proptest::prelude::*;

    fn geometry_with(ledges: &[Rect]) -> LevelGeometry {
        let mut geometry = LevelGeometry::default();
        for ledge in ledges {
            geometry.ledges.push(*ledge);
        }
        geometry
    }

    /// Falling player moved from `from_top` to `to_top` at pixel column `left`
    fn falling(left: i32, from_top: i32, to_top: i32) -> Player {
        let mut player = Player::default();
        player.mode = PlayerMode::Flying;
        player.v_vel = to_subpixels(to_top - from_top);
        player.place_at(left, from_top);
        player.snapshot();
        player.integrate();
        player
    }

    #[test]
    fn test_fast_fall_lands_exactly_on_surface() {
        let geometry = geometry_with(&[Rect::new(100, 300, 300, 314)]);
        // Feet go from 263 to 313, through the top edge at 300
        let mut player = falling(150, 226, 276);
        let contact = resolve_platforms(&mut player, &geometry);

        assert_eq!(
            contact,
            Some(PlatformContact::Landed {
                ledge: 0,
                touch_down: false
            })
        );
        assert_eq!(player.dest.bottom, 300);
        assert_eq!(player.v_vel, 0);
        assert!(player.is_grounded());
    }

    #[test]
    fn test_nearest_of_stacked_ledges_wins() {
        // Listed lower ledge first: array order must not decide
        let geometry = geometry_with(&[Rect::new(100, 330, 300, 344), Rect::new(100, 300, 300, 314)]);
        let mut player = falling(150, 240, 300);
        let contact = resolve_platforms(&mut player, &geometry);

        assert_eq!(
            contact,
            Some(PlatformContact::Landed {
                ledge: 1,
                touch_down: false
            })
        );
        assert_eq!(player.dest.bottom, 300);
    }

    #[test]
    fn test_touch_down_zone_catches_first() {
        let ledge = Rect::new(100, 300, 300, 314);
        let mut geometry = geometry_with(&[ledge]);
        geometry.touch_downs.push(touch_down_zone(&ledge));

        // Feet end inside the strip, above the ledge top
        let mut player = falling(150, 250, 258);
        let contact = resolve_platforms(&mut player, &geometry);

        assert_eq!(
            contact,
            Some(PlatformContact::Landed {
                ledge: 0,
                touch_down: true
            })
        );
        assert_eq!(player.dest.bottom, 300);
    }

    #[test]
    fn test_miss_beside_ledge_keeps_falling() {
        let geometry = geometry_with(&[Rect::new(100, 300, 300, 314)]);
        let mut player = falling(400, 240, 300);
        assert_eq!(resolve_platforms(&mut player, &geometry), None);
        assert!(player.is_flying());
    }

    #[test]
    fn test_ledge_across_seam_supports_player() {
        // Only the left-edge slice exists; the player straddles the right edge
        let geometry = geometry_with(&[Rect::new(0, 284, 149, 298)]);
        let mut player = falling(610, 200, 260);
        let contact = resolve_platforms(&mut player, &geometry);
        assert!(matches!(contact, Some(PlatformContact::Landed { ledge: 0, .. })));
        assert_eq!(player.dest.bottom, 284);

        // Same slice, far from the seam: nothing underfoot
        let mut player = falling(200, 200, 260);
        assert_eq!(resolve_platforms(&mut player, &geometry), None);
    }

    #[test]
    fn test_no_landing_beside_drawn_ledges() {
        let geometry = LevelGeometry::for_level(0);
        for left in [160, 200, 400] {
            let mut player = falling(left, 230, 260);
            assert_eq!(resolve_platforms(&mut player, &geometry), None, "column {left}");
            assert!(player.is_flying());
        }
    }

    #[test]
    fn test_walk_off_drawn_end_of_split_ledge() {
        let geometry = LevelGeometry::for_level(0);
        let mut player = Player::default();
        player.mode = PlayerMode::Walking;
        player.place_at(150, 284 - PLAYER_HEIGHT);
        assert_eq!(
            resolve_platforms(&mut player, &geometry),
            Some(PlatformContact::WalkedOff)
        );
    }

    #[test]
    fn test_walking_off_edge_starts_fall() {
        let geometry = geometry_with(&[Rect::new(100, 300, 300, 314)]);
        let mut player = Player::default();
        player.mode = PlayerMode::Walking;
        player.place_at(320, 300 - PLAYER_HEIGHT);

        assert_eq!(
            resolve_platforms(&mut player, &geometry),
            Some(PlatformContact::WalkedOff)
        );
        assert!(player.is_flying());
        assert_eq!(player.v_vel, 0);
    }

    #[test]
    fn test_head_bonk_under_ledge() {
        let geometry = geometry_with(&[Rect::new(100, 300, 300, 314)]);
        let mut player = Player::default();
        player.mode = PlayerMode::Flying;
        player.place_at(150, 320);
        player.snapshot();
        player.v_vel = -to_subpixels(10);
        player.integrate();

        assert_eq!(
            resolve_platforms(&mut player, &geometry),
            Some(PlatformContact::Bonked { ledge: 0 })
        );
        assert_eq!(player.dest.top, 314);
        assert!(player.v_vel > 0);
    }

    #[test]
    fn test_lava_and_roof_are_lethal() {
        let geometry = LevelGeometry::for_level(0);
        let mut player = Player::default();
        assert_eq!(check_lava_roof(&player, &geometry), None);

        player.place_at(300, LAVA_TOP - PLAYER_HEIGHT + 1);
        assert_eq!(check_lava_roof(&player, &geometry), Some(LethalContact::Lava));

        player.place_at(300, -1);
        assert_eq!(check_lava_roof(&player, &geometry), Some(LethalContact::Roof));
    }

    #[test]
    fn test_wrap_preserves_vertical_state() {
        let mut player = Player::default();
        player.mode = PlayerMode::Flying;
        player.place_at(SCREEN_WIDTH + 5, 200);
        player.v_vel = 40;

        assert!(wrap_around(&mut player));
        assert_eq!(player.dest.left, 5);
        assert_eq!(player.dest.top, 200);
        assert_eq!(player.v_vel, 40);
        assert!(player.wrapped);

        assert!(!wrap_around(&mut player));
    }

    proptest! {
        #[test]
        fn prop_wrap_keeps_player_in_bounds(h in -100_000i32..100_000, v in 0i32..5_000) {
            let mut player = Player::default();
            player.h = h;
            player.v = v;
            player.sync_dest();
            wrap_around(&mut player);
            prop_assert!(player.dest.left >= 0 && player.dest.left < SCREEN_WIDTH);
            prop_assert!(player.h >= 0 && player.h < to_subpixels(SCREEN_WIDTH));
            prop_assert_eq!(player.v, v);
        }

        #[test]
        fn prop_no_tunneling_through_ledge(
            left in 110i32..250,
            start in 150i32..262,
            fall in 1i32..60,
        ) {
            let geometry = geometry_with(&[Rect::new(100, 300, 300, 314)]);
            let end = start + fall;
            let mut player = falling(left, start, end);
            let crossed = start + PLAYER_HEIGHT <= 300 && end + PLAYER_HEIGHT >= 300;
            resolve_platforms(&mut player, &geometry);
            if crossed {
                prop_assert_eq!(player.dest.bottom, 300);
                prop_assert_eq!(player.v_vel, 0);
            } else {
                prop_assert!(player.dest.bottom < 300);
            }
        }

        #[test]
        fn prop_landings_rest_on_drawn_platforms(
            level in 0u32..4,
            left in 0i32..SCREEN_WIDTH,
            start in 0i32..400,
            fall in 1i32..60,
        ) {
            let geometry = LevelGeometry::for_level(level);
            let mut player = falling(left, start, start + fall);
            if let Some(PlatformContact::Landed { .. }) = resolve_platforms(&mut player, &geometry) {
                let dest = player.dest;
                let on_drawn = geometry
                    .platform_copies
                    .as_slice()
                    .iter()
                    .any(|copy| copy.top == dest.bottom && spans_overlap_wrapped(&dest, copy));
                prop_assert!(on_drawn, "landed at {:?} off every drawn platform", dest);
            }
        }
    }
}
