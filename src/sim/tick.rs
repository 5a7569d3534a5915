//! Fixed-tick simulation step
//!
//! One call advances the running session by one display frame in a fixed
//! order: spawn scheduling, player physics, then obstacle movement with
//! collision and scoring. A collision freezes the session before the tick
//! returns.

use super::autopilot;
use super::difficulty::spawn_gap_bounds;
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;
use crate::uniform_ms;

/// Input state sampled at the tick boundary
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump button currently held
    pub hold: bool,
    /// Idle/demo mode - the bot plays
    pub autopilot: bool,
}

/// Simulation steps per tick; the game is tuned in per-frame units
const DT: f32 = 1.0;

/// Advance the game state by one tick at frame time `now`
pub fn tick(state: &mut GameState, input: &TickInput, now: f64, tuning: &Tuning) {
    if state.phase != GamePhase::Running {
        return;
    }

    let mut hold = input.hold;
    if input.autopilot {
        hold = autopilot::wants_jump(state, tuning);
        if hold {
            state.player.apply_jump_start(tuning);
        }
    }

    state.ticks += 1;

    if now >= state.session.next_spawn_at {
        let score = state.session.score;
        let id = state.obstacles.spawn(now, score, &mut state.rng, tuning);
        state.events.push(GameEvent::ObstacleSpawned { id });

        let gap = spawn_gap_bounds(score, tuning);
        state.session.next_spawn_at = now + uniform_ms(&mut state.rng, gap.min_ms, gap.max_ms);
    }

    state.player.step(hold, tuning);

    let score_before = state.session.score;
    let advance = state
        .obstacles
        .advance(DT, now, &state.player, &mut state.session, tuning);

    for (i, id) in advance.retired.iter().enumerate() {
        state.events.push(GameEvent::ObstacleRetired { id: *id });
        state.events.push(GameEvent::Scored {
            score: score_before + i as u32 + 1,
        });
    }

    if let Some(obstacle) = advance.collided {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Collided { obstacle });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::Obstacle;

    fn running_state(tuning: &Tuning) -> GameState {
        let mut state = GameState::new(12345, tuning);
        state.reset(0.0, tuning);
        state.phase = GamePhase::Running;
        state
    }

    fn obstacle(x: f32, width: f32, height: f32) -> Obstacle {
        Obstacle {
            id: 0,
            x,
            width,
            height,
            spawned_at: 0.0,
            bob: None,
            baseline: 20.0,
            bottom: 20.0,
        }
    }

    #[test]
    fn test_idle_state_does_not_tick() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        tick(&mut state, &TickInput::default(), 5000.0, &tuning);
        assert_eq!(state.ticks, 0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_first_spawn_waits_for_delay() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);

        tick(&mut state, &TickInput::default(), 600.0, &tuning);
        assert!(state.obstacles.is_empty());

        tick(&mut state, &TickInput::default(), 700.0, &tuning);
        assert_eq!(state.obstacles.len(), 1);
        assert!(matches!(state.events[0], GameEvent::ObstacleSpawned { .. }));

        let gap = state.session.next_spawn_at - 700.0;
        assert!((900.0..1600.0).contains(&gap), "gap = {gap}");
    }

    #[test]
    fn test_retirement_emits_score_events() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        let a = state.obstacles.insert(obstacle(-21.0, 20.0, 30.0));
        let b = state.obstacles.insert(obstacle(-20.0, 20.0, 30.0));

        tick(&mut state, &TickInput::default(), 16.0, &tuning);
        assert_eq!(state.session.score, 2);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::ObstacleRetired { id: a },
                GameEvent::Scored { score: 1 },
                GameEvent::ObstacleRetired { id: b },
                GameEvent::Scored { score: 2 },
            ]
        );
        assert!(state.is_running());
    }

    #[test]
    fn test_collision_ends_session() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        let id = state.obstacles.insert(obstacle(70.0, 20.0, 40.0));

        tick(&mut state, &TickInput::default(), 16.0, &tuning);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.drain_events(), vec![GameEvent::Collided { obstacle: id }]);

        // Frozen: further ticks change nothing
        let x = state.obstacles.get(id).unwrap().x;
        tick(&mut state, &TickInput::default(), 32.0, &tuning);
        assert_eq!(state.obstacles.get(id).unwrap().x, x);
        assert_eq!(state.ticks, 1);
    }

    #[test]
    fn test_jumping_clears_a_low_obstacle() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        state.session.next_spawn_at = f64::MAX;
        // 20px tall, passes under a held jump
        state.obstacles.insert(obstacle(150.0, 16.0, 20.0));

        let mut now = 0.0;
        let mut input = TickInput::default();
        for i in 0..200 {
            now += 16.0;
            // Jump when the obstacle is close
            if i == 10 {
                state.player.apply_jump_start(&tuning);
                input.hold = true;
            }
            tick(&mut state, &input, now, &tuning);
            assert!(state.is_running(), "hit on tick {i}");
        }
        assert_eq!(state.session.score, 1);
    }

    #[test]
    fn test_autopilot_jumps_when_obstacle_near() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        state.session.next_spawn_at = f64::MAX;
        state.obstacles.insert(obstacle(120.0, 20.0, 30.0));

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input, 16.0, &tuning);
        assert!(state.player.airborne);
    }
}
