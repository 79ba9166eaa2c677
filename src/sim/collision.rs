//! Collision detection and response for the player against level geometry
//!
//! Detection is two-phase: a strict AABB test rejects distant pairs, then a
//! grid of points sampled over the player is tested against the other
//! rectangle. A single sample inside is enough to count as contact.
//!
//! Resolution runs one axis at a time. The horizontal pass happens right after
//! x is integrated and only handles side contacts; the vertical pass happens
//! after y is integrated and only handles top/bottom contacts. Because the
//! passes are sequential, a fast player can still pass through geometry
//! thinner than one tick of travel.

use glam::Vec2;

use super::rect::Rect;
use super::state::{Level, Player};
use crate::tuning::Tuning;

/// Side of B that A is touching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// A is above B (landing)
    Top,
    /// A is below B (head bump)
    Bottom,
    /// A is left of B
    Left,
    /// A is right of B
    Right,
}

impl Contact {
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Contact::Top | Contact::Bottom)
    }
}

/// What kind of surface the player ended up supported by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    Static(usize),
    Kinematic(usize),
}

/// Narrow phase: any grid sample of `a` lies inside `b`
pub fn grid_overlap(a: &Rect, b: &Rect, spacing: f32) -> bool {
    a.sample_grid(spacing).any(|p| b.contains_point(p))
}

/// Broad phase then narrow phase
#[inline]
pub fn collides(a: &Rect, b: &Rect, spacing: f32) -> bool {
    a.intersects(b) && grid_overlap(a, b, spacing)
}

/// Classify a confirmed collision.
///
/// The axis with the smaller overlap is the one to push out along. Equal
/// overlaps are treated as vertical.
pub fn contact_direction(a: &Rect, b: &Rect) -> Contact {
    let overlap = a.overlap(b);
    let a_center = a.center();
    let b_center = b.center();

    if overlap.x >= overlap.y {
        if a_center.y < b_center.y {
            Contact::Top
        } else {
            Contact::Bottom
        }
    } else if a_center.x < b_center.x {
        Contact::Left
    } else {
        Contact::Right
    }
}

/// Collide and classify in one go
pub fn check_contact(a: &Rect, b: &Rect, spacing: f32) -> Option<Contact> {
    collides(a, b, spacing).then(|| contact_direction(a, b))
}

/// Plain AABB overlap against a set of trigger rectangles (hazards, goals)
pub fn overlaps_any(rect: &Rect, triggers: &[Rect]) -> bool {
    triggers.iter().any(|t| rect.intersects(t))
}

/// Horizontal pass: push the player out of side contacts.
///
/// Clears `on_ground`; the vertical pass re-establishes it.
pub fn resolve_horizontal(player: &mut Player, level: &Level, tuning: &Tuning) {
    player.on_ground = false;

    for solid in level.solids() {
        let rect = player.rect();
        match check_contact(&rect, solid, tuning.sample_spacing) {
            Some(Contact::Left) => {
                player.pos.x = solid.left() - player.size.x - tuning.contact_buffer;
                player.vel.x = 0.0;
            }
            Some(Contact::Right) => {
                player.pos.x = solid.right() + tuning.contact_buffer;
                player.vel.x = 0.0;
            }
            _ => {}
        }
    }
}

/// Vertical pass: land on or bump off platforms, then probe for ground.
///
/// Returns the surface the player ends up standing on, if any. Standing on a
/// kinematic platform carries the player along by the platform's velocity.
pub fn resolve_vertical(
    player: &mut Player,
    level: &Level,
    scale: f32,
    tuning: &Tuning,
) -> Option<Support> {
    let mut support = None;

    for (i, platform) in level.platforms.iter().enumerate() {
        if resolve_vertical_contact(player, platform, tuning) {
            support = Some(Support::Static(i));
        }
    }

    for (i, mover) in level.kinematic_platforms.iter().enumerate() {
        if resolve_vertical_contact(player, &mover.rect, tuning) {
            player.pos.x += mover.velocity * scale;
            support = Some(Support::Kinematic(i));
        }
    }

    if support.is_none() {
        support = settle_on_probe(player, level, scale, tuning);
    }

    support
}

/// Apply a top/bottom contact with one solid. Returns true when landing.
fn resolve_vertical_contact(player: &mut Player, solid: &Rect, tuning: &Tuning) -> bool {
    let rect = player.rect();
    match check_contact(&rect, solid, tuning.sample_spacing) {
        Some(Contact::Top) => {
            player.pos.y = solid.top() - player.size.y - tuning.contact_buffer;
            player.vel.y = 0.0;
            player.on_ground = true;
            true
        }
        Some(Contact::Bottom) => {
            player.pos.y = solid.bottom() + tuning.contact_buffer;
            player.vel.y = 0.0;
            false
        }
        _ => false,
    }
}

/// Short downward ray from the player's bottom-center.
///
/// Hits a solid whose top edge lies within `ground_probe_length` below the
/// player's feet. Static platforms are checked before kinematic ones.
pub fn ground_probe(player: &Player, level: &Level, tuning: &Tuning) -> Option<Support> {
    let ray_x = player.pos.x + player.size.x / 2.0;
    let ray_y = player.pos.y + player.size.y;
    let ray_end = ray_y + tuning.ground_probe_length;
    let hit = |r: &Rect| ray_x >= r.left() && ray_x <= r.right() && ray_y <= r.top() && ray_end >= r.top();

    if let Some(i) = level.platforms.iter().position(|r| hit(r)) {
        return Some(Support::Static(i));
    }
    level
        .kinematic_platforms
        .iter()
        .position(|p| hit(&p.rect))
        .map(Support::Kinematic)
}

/// When the main pass found no landing, a probe hit while not rising puts the
/// player back at rest on that surface (same buffer, ride-along included).
fn settle_on_probe(player: &mut Player, level: &Level, scale: f32, tuning: &Tuning) -> Option<Support> {
    if player.vel.y < 0.0 {
        return None;
    }
    let support = ground_probe(player, level, tuning)?;
    let top = match support {
        Support::Static(i) => level.platforms[i].top(),
        Support::Kinematic(i) => {
            let mover = &level.kinematic_platforms[i];
            player.pos.x += mover.velocity * scale;
            mover.rect.top()
        }
    };
    player.pos.y = top - player.size.y - tuning.contact_buffer;
    player.vel.y = 0.0;
    player.on_ground = true;
    Some(support)
}

/// Every narrow-phase sample of `rect`, flagged by whether it lies inside any
/// of `targets` (debug visualization).
pub fn sample_points<'a>(
    rect: &'a Rect,
    targets: impl Iterator<Item = &'a Rect> + Clone + 'a,
    spacing: f32,
) -> impl Iterator<Item = (Vec2, bool)> + 'a {
    rect.sample_grid(spacing).map(move |p| {
        let hit = targets
            .clone()
            .any(|t| rect.intersects(t) && t.contains_point(p));
        (p, hit)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::KinematicPlatform;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), Vec2::splat(36.0))
    }

    fn floor_level() -> Level {
        Level {
            id: 1,
            spawn: Vec2::new(100.0, 300.0),
            platforms: vec![Rect::new(0.0, 560.0, 400.0, 40.0)],
            ..Default::default()
        }
    }

    #[test]
    fn test_broad_phase_rejects_touching() {
        let a = Rect::new(0.0, 0.0, 36.0, 36.0);
        let b = Rect::new(36.0, 0.0, 10.0, 36.0);
        assert!(!collides(&a, &b, 4.0));
    }

    #[test]
    fn test_minimal_overlap_counts() {
        let a = Rect::new(0.0, 0.0, 36.0, 36.0);
        let b = Rect::new(35.5, 10.0, 50.0, 10.0);
        assert!(collides(&a, &b, 4.0));
    }

    #[test]
    fn test_sliver_between_samples_is_missed() {
        // A 1-unit sliver strictly between sample columns x=0,4,8..
        let a = Rect::new(0.0, 0.0, 36.0, 36.0);
        let b = Rect::new(5.5, -10.0, 1.0, 100.0);
        assert!(a.intersects(&b));
        assert!(!grid_overlap(&a, &b, 4.0));
    }

    #[test]
    fn test_direction_classification() {
        let platform = Rect::new(0.0, 100.0, 200.0, 40.0);
        // Sunk 5 units into the top: wide X overlap, shallow Y overlap
        assert_eq!(
            contact_direction(&Rect::new(50.0, 69.0, 36.0, 36.0), &platform),
            Contact::Top
        );
        // Head inside the bottom
        assert_eq!(
            contact_direction(&Rect::new(50.0, 135.0, 36.0, 36.0), &platform),
            Contact::Bottom
        );
        // Poking 3 units into the left side
        assert_eq!(
            contact_direction(&Rect::new(-33.0, 100.0, 36.0, 36.0), &platform),
            Contact::Left
        );
        assert_eq!(
            contact_direction(&Rect::new(197.0, 100.0, 36.0, 36.0), &platform),
            Contact::Right
        );
    }

    #[test]
    fn test_tie_resolves_vertical() {
        let b = Rect::new(0.0, 0.0, 100.0, 100.0);
        let a = Rect::new(-30.0, -30.0, 36.0, 36.0);
        let overlap = a.overlap(&b);
        assert_eq!(overlap.x, overlap.y);
        assert_eq!(contact_direction(&a, &b), Contact::Top);
    }

    #[test]
    fn test_horizontal_pass_pushes_left_with_buffer() {
        let level = Level {
            platforms: vec![Rect::new(200.0, 400.0, 40.0, 200.0)],
            ..Default::default()
        };
        let mut player = player_at(168.0, 450.0);
        player.vel.x = 5.0;
        resolve_horizontal(&mut player, &level, &Tuning::default());
        assert_eq!(player.pos.x, 200.0 - 36.0 - 1.0);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_horizontal_pass_ignores_floor() {
        let level = floor_level();
        // Sunk into the floor: vertical contact, not the horizontal pass's job
        let mut player = player_at(100.0, 530.0);
        player.vel.x = 2.0;
        player.on_ground = true;
        resolve_horizontal(&mut player, &level, &Tuning::default());
        assert_eq!(player.pos.x, 100.0);
        assert_eq!(player.vel.x, 2.0);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_landing_sets_ground() {
        let level = floor_level();
        let mut player = player_at(100.0, 530.0);
        player.vel.y = 6.0;
        let support = resolve_vertical(&mut player, &level, 1.0, &Tuning::default());
        assert_eq!(support, Some(Support::Static(0)));
        assert_eq!(player.pos.y, 560.0 - 36.0 - 1.0);
        assert_eq!(player.vel.y, 0.0);
        assert!(player.on_ground);
    }

    #[test]
    fn test_head_bump() {
        let level = Level {
            platforms: vec![Rect::new(0.0, 200.0, 400.0, 40.0)],
            ..Default::default()
        };
        let mut player = player_at(100.0, 235.0);
        player.vel.y = -12.0;
        let support = resolve_vertical(&mut player, &level, 1.0, &Tuning::default());
        assert_eq!(support, None);
        assert_eq!(player.pos.y, 241.0);
        assert_eq!(player.vel.y, 0.0);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_kinematic_ride_along() {
        let level = Level {
            kinematic_platforms: vec![KinematicPlatform::new(
                Rect::new(80.0, 400.0, 100.0, 40.0),
                0.0,
                500.0,
                3.0,
            )],
            ..Default::default()
        };
        let mut player = player_at(100.0, 368.0);
        player.vel.y = 4.0;
        let support = resolve_vertical(&mut player, &level, 2.0, &Tuning::default());
        assert_eq!(support, Some(Support::Kinematic(0)));
        assert_eq!(player.pos.x, 106.0);
        assert_eq!(player.pos.y, 363.0);
        assert!(player.on_ground);
    }

    #[test]
    fn test_probe_keeps_resting_player_still() {
        let level = floor_level();
        let rest_y = 560.0 - 36.0 - 1.0;
        let mut player = player_at(100.0, rest_y + 0.8);
        player.vel.y = 0.8;
        let support = resolve_vertical(&mut player, &level, 1.0, &Tuning::default());
        assert_eq!(support, Some(Support::Static(0)));
        assert_eq!(player.pos.y, rest_y);
        assert_eq!(player.vel.y, 0.0);
        assert!(player.on_ground);
    }

    #[test]
    fn test_probe_ignores_rising_player() {
        let level = floor_level();
        let mut player = player_at(100.0, 560.0 - 36.0 - 2.0);
        player.vel.y = -16.0;
        assert_eq!(resolve_vertical(&mut player, &level, 0.0, &Tuning::default()), None);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_probe_misses_past_edge() {
        let level = floor_level();
        // Bottom-center at x=418, past the platform's right edge
        let player = player_at(400.0, 560.0 - 36.0 - 1.0);
        assert_eq!(ground_probe(&player, &level, &Tuning::default()), None);
    }

    #[test]
    fn test_overlaps_any() {
        let spikes = [Rect::new(350.0, 520.0, 80.0, 40.0)];
        assert!(overlaps_any(&Rect::new(340.0, 500.0, 36.0, 36.0), &spikes));
        assert!(!overlaps_any(&Rect::new(300.0, 500.0, 36.0, 36.0), &spikes));
    }

    #[test]
    fn test_sample_points_flags_hits() {
        let player = Rect::new(0.0, 0.0, 36.0, 36.0);
        let floor = [Rect::new(-10.0, 34.0, 100.0, 40.0)];
        let samples: Vec<(Vec2, bool)> = sample_points(&player, floor.iter(), 4.0).collect();
        assert_eq!(samples.len(), 100);
        // Only the bottom row (y=36) is inside the floor
        assert_eq!(samples.iter().filter(|(_, hit)| *hit).count(), 10);
    }

    #[test]
    fn test_landing_across_static_and_kinematic_seam() {
        let tuning = Tuning::default();
        // Static floor ends where the kinematic platform begins; the player straddles both
        for (kin_top, expected, rest_y) in [
            (555.0, Support::Kinematic(0), 518.0),
            (560.0, Support::Static(0), 523.0),
            (565.0, Support::Static(0), 523.0),
        ] {
            let level = Level {
                id: 1,
                spawn: Vec2::new(100.0, 300.0),
                platforms: vec![Rect::new(0.0, 560.0, 200.0, 40.0)],
                kinematic_platforms: vec![KinematicPlatform::new(
                    Rect::new(200.0, kin_top, 200.0, 40.0),
                    200.0,
                    200.0,
                    0.0,
                )],
                ..Default::default()
            };
            let mut player = player_at(182.0, 530.0);
            player.vel.y = 10.0;

            let support = resolve_vertical(&mut player, &level, 1.0, &tuning);
            assert_eq!(support, Some(expected), "kinematic top {kin_top}");
            assert!(player.on_ground);
            assert_eq!(player.vel.y, 0.0);
            assert_eq!(player.pos.y, rest_y);
        }
    }
}
