//! Demo mode: a simple bot that jumps over the next obstacle
//!
//! It presses jump once the closest obstacle ahead is due to pass the
//! player's centre in about half a jump's airtime, and keeps holding while
//! that obstacle is still in front.

use super::state::GameState;
use crate::tuning::Tuning;

/// Ticks from take-off to the apex of a held jump, roughly
fn ticks_to_apex(tuning: &Tuning) -> f32 {
    let boosted = tuning.jump_velocity + tuning.hold_thrust * (tuning.max_hold_ms / tuning.tick_ms);
    if tuning.gravity > 0.0 { boosted / tuning.gravity } else { f32::MAX }
}

/// Whether the bot wants the jump button down this tick
pub fn wants_jump(state: &GameState, tuning: &Tuning) -> bool {
    let player = &state.player;
    let center = player.x + player.width / 2.0;
    let speed = state.session.speed.max(f32::EPSILON);

    let nearest = state
        .obstacles
        .obstacles
        .iter()
        .filter(|o| o.right() >= player.x)
        .map(|o| (o.x + o.width / 2.0 - center) / speed)
        .fold(f32::MAX, f32::min);

    if nearest == f32::MAX {
        return false;
    }
    if player.airborne {
        // Keep boosting while the obstacle is still ahead
        return nearest > 0.0;
    }
    nearest <= ticks_to_apex(tuning) * 0.9
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::Obstacle;

    fn obstacle_at(x: f32) -> Obstacle {
        Obstacle {
            id: 0,
            x,
            width: 20.0,
            height: 40.0,
            spawned_at: 0.0,
            bob: None,
            baseline: 20.0,
            bottom: 20.0,
        }
    }

    #[test]
    fn test_no_obstacles_no_jump() {
        let tuning = Tuning::default();
        let state = GameState::new(1, &tuning);
        assert!(!wants_jump(&state, &tuning));
    }

    #[test]
    fn test_far_obstacle_waits_near_obstacle_jumps() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.obstacles.insert(obstacle_at(700.0));
        assert!(!wants_jump(&state, &tuning));

        state.obstacles.clear();
        state.obstacles.insert(obstacle_at(120.0));
        assert!(wants_jump(&state, &tuning));
    }

    #[test]
    fn test_ignores_obstacles_behind() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.obstacles.insert(obstacle_at(0.0));
        assert!(!wants_jump(&state, &tuning));
    }
}
