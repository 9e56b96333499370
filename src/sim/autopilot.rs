//! Idle/demo player
//!
//! Jumps when the nearest ground hazard ahead gets within a fixed number of
//! ticks of reaching the runner. Purely a function of the session, so demo
//! runs stay deterministic.

use super::state::{GamePhase, Session};

/// How many ticks ahead of contact the autopilot commits to a jump
const LEAD_TICKS: f32 = 12.0;

/// Should the demo player press jump this tick?
pub fn should_jump(state: &Session) -> bool {
    if state.phase != GamePhase::Playing || !state.runner.grounded {
        return false;
    }

    let runner = state.runner.rect();
    let reach = state.speed * LEAD_TICKS;

    // Airborne hazards float above a grounded runner; only ground hazards matter
    state
        .obstacles
        .iter()
        .filter(|o| !o.kind.is_airborne())
        .map(|o| o.rect.left() - runner.right())
        .filter(|&gap| gap > -runner.size.x)
        .any(|gap| gap <= reach)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::machine::{TickInput, begin_or_restart, tick};
    use crate::sim::state::{Obstacle, ObstacleKind};

    #[test]
    fn test_ignores_far_and_airborne() {
        let mut state = Session::new(1, 0);
        begin_or_restart(&mut state);
        state.obstacles.push(Obstacle::ground(1, ObstacleKind::SmallGround));
        assert!(!should_jump(&state));

        let mut bird = Obstacle::airborne(2, 0.0);
        bird.rect.pos.x = RUNNER_START_X + RUNNER_WIDTH + 10.0;
        state.obstacles.push(bird);
        assert!(!should_jump(&state));

        let mut cactus = Obstacle::ground(3, ObstacleKind::LargeGround);
        cactus.rect.pos.x = RUNNER_START_X + RUNNER_WIDTH + 10.0;
        state.obstacles.push(cactus);
        assert!(should_jump(&state));
    }

    #[test]
    fn test_never_jumps_outside_play() {
        let mut state = Session::new(1, 0);
        let mut cactus = Obstacle::ground(3, ObstacleKind::SmallGround);
        cactus.rect.pos.x = RUNNER_START_X + RUNNER_WIDTH + 10.0;
        state.obstacles.push(cactus);
        assert!(!should_jump(&state));
    }

    #[test]
    fn test_autopilot_survives_early_game() {
        let mut state = Session::new(42, 0);
        begin_or_restart(&mut state);
        for _ in 0..1500 {
            let input = TickInput {
                jump: should_jump(&state),
                ..Default::default()
            };
            tick(&mut state, &input);
            assert_eq!(state.phase, GamePhase::Playing, "crashed at tick {}", state.time_ticks);
        }
    }
}
