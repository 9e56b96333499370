//! Runner vs obstacle collision
//!
//! Plain AABB overlap after shrinking both boxes inward by the same padding.
//! The padding forgives edge grazes; it is a tuning knob
//! (`consts::COLLISION_PADDING`), not a physical margin.

use super::rect::Rect;
use super::state::{Obstacle, Runner};
use crate::consts::COLLISION_PADDING;

/// Overlap test with `pad` removed from every side of both boxes
pub fn padded_overlap(a: &Rect, b: &Rect, pad: f32) -> bool {
    a.shrink(pad).intersects(&b.shrink(pad))
}

/// Does the runner touch this obstacle this tick?
#[inline]
pub fn runner_hits(runner: &Runner, obstacle: &Obstacle) -> bool {
    padded_overlap(&runner.rect(), &obstacle.rect, COLLISION_PADDING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::ObstacleKind;
    use proptest::prelude::*;

    /// Runner box is x 50..90, y 340..380; shrunk: x 55..85, y 345..375
    fn runner_rect() -> Rect {
        Runner::default().rect()
    }

    /// A small ground hazard (30x50) whose shrunk box is x+5..x+25, y 335..375
    fn hazard_at(x: f32) -> Rect {
        let mut obstacle = Obstacle::ground(1, ObstacleKind::SmallGround);
        obstacle.rect.pos.x = x;
        obstacle.rect
    }

    #[test]
    fn test_touching_padded_edges_miss() {
        // Shrunk hazard left edge = 85 = shrunk runner right edge
        assert!(!padded_overlap(&runner_rect(), &hazard_at(80.0), COLLISION_PADDING));
    }

    #[test]
    fn test_one_unit_overlap_hits() {
        assert!(padded_overlap(&runner_rect(), &hazard_at(79.0), COLLISION_PADDING));
    }

    #[test]
    fn test_one_unit_gap_misses() {
        assert!(!padded_overlap(&runner_rect(), &hazard_at(81.0), COLLISION_PADDING));
    }

    #[test]
    fn test_trailing_edge_boundary() {
        // Shrunk hazard right edge = x + 25 against shrunk runner left edge 55
        assert!(!padded_overlap(&runner_rect(), &hazard_at(30.0), COLLISION_PADDING));
        assert!(padded_overlap(&runner_rect(), &hazard_at(31.0), COLLISION_PADDING));
    }

    #[test]
    fn test_jump_clears_large_hazard_top() {
        // Large hazard 40x70 on the floor: top 310, shrunk top 315.
        // Jumping runner's shrunk bottom is y + 35.
        let mut cactus = Obstacle::ground(1, ObstacleKind::LargeGround);
        cactus.rect.pos.x = RUNNER_START_X;
        let mut runner = Runner::default();
        runner.grounded = false;

        runner.pos.y = 280.0; // touching
        assert!(!runner_hits(&runner, &cactus));

        runner.pos.y = 281.0;
        assert!(runner_hits(&runner, &cactus));

        // Same height clears a small hazard (shrunk top 335) with room to spare
        let mut small = Obstacle::ground(2, ObstacleKind::SmallGround);
        small.rect.pos.x = RUNNER_START_X;
        runner.pos.y = 300.0;
        assert!(!runner_hits(&runner, &small));
        runner.pos.y = 301.0;
        assert!(runner_hits(&runner, &small));
    }

    #[test]
    fn test_raw_overlap_forgiven_by_padding() {
        // Raw boxes overlap by 9 units, padded boxes do not
        let hazard = hazard_at(81.0);
        assert!(runner_rect().intersects(&hazard));
        assert!(!padded_overlap(&runner_rect(), &hazard, COLLISION_PADDING));
    }

    #[test]
    fn test_vertical_boundary() {
        // Airborne hazard 40x30; shrunk bottom = y + 25. Runner shrunk top = 345.
        let mut bird = Obstacle::airborne(1, 0.0);
        bird.rect.pos.x = RUNNER_START_X;

        bird.rect.pos.y = 320.0; // shrunk bottom 345: touching
        assert!(!runner_hits(&Runner::default(), &bird));

        bird.rect.pos.y = 321.0; // 1 unit overlap
        assert!(runner_hits(&Runner::default(), &bird));

        bird.rect.pos.y = 319.0; // 1 unit gap
        assert!(!runner_hits(&Runner::default(), &bird));
    }

    #[test]
    fn test_grounded_runner_clears_lowest_airborne_hazard() {
        let mut bird = Obstacle::airborne(1, 0.0);
        bird.rect.pos.x = RUNNER_START_X;
        assert!(!runner_hits(&Runner::default(), &bird));
    }

    proptest! {
        #[test]
        fn prop_padded_overlap_matches_shrunk_intersection(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            aw in 0.0f32..80.0, ah in 0.0f32..80.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            bw in 0.0f32..80.0, bh in 0.0f32..80.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            let sa = a.shrink(COLLISION_PADDING);
            let sb = b.shrink(COLLISION_PADDING);
            let expected = sa.left() < sb.right()
                && sb.left() < sa.right()
                && sa.top() < sb.bottom()
                && sb.top() < sa.bottom();
            prop_assert_eq!(padded_overlap(&a, &b, COLLISION_PADDING), expected);
            // Symmetric
            prop_assert_eq!(padded_overlap(&a, &b, COLLISION_PADDING), padded_overlap(&b, &a, COLLISION_PADDING));
        }
    }
}
