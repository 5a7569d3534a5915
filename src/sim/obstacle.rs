//! Obstacles: spawning, scrolling, bobbing and retirement
//!
//! Each tick an obstacle moves left, re-derives its vertical offset, is tested
//! against the player, and only then is checked for retirement. A collision
//! ends the pass immediately, so an obstacle can never score on the same tick
//! it kills the player.

use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{BoundsProvider, Rect, collides};
use super::difficulty::{max_obstacle_height, speed_for_score};
use super::state::SessionState;
use crate::tuning::Tuning;
use crate::uniform;

/// Vertical oscillation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bob {
    /// Peak offset from the baseline (px)
    pub amplitude: f32,
    /// Starting phase (radians)
    pub phase: f32,
    /// Phase advance per scaled millisecond
    pub angular_speed: f32,
}

impl Bob {
    /// Offset from the baseline `elapsed_ms` after spawn
    pub fn offset(&self, elapsed_ms: f32, time_scale: f32) -> f32 {
        (self.angular_speed * elapsed_ms * time_scale + self.phase).sin() * self.amplitude
    }
}

/// A single obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge (px from the play area's left edge)
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Frame timestamp at spawn
    pub spawned_at: f64,
    pub bob: Option<Bob>,
    /// Resting `bottom` offset
    pub baseline: f32,
    /// Current `bottom` offset (baseline plus bob)
    pub bottom: f32,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Fully left of the play area
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }

    /// Scroll left and recompute the vertical offset
    pub fn advance(&mut self, dt: f32, now: f64, speed: f32, time_scale: f32) {
        self.x -= speed * dt;
        self.bottom = match self.bob {
            Some(bob) => self.baseline + bob.offset((now - self.spawned_at) as f32, time_scale),
            None => self.baseline,
        };
    }
}

impl BoundsProvider for Obstacle {
    fn bounds(&self) -> Rect {
        Rect::from_bottom_left(self.x, self.bottom, self.width, self.height)
    }
}

/// Outcome of one obstacle pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Advance {
    /// Obstacles retired this pass, in retirement order
    pub retired: Vec<u32>,
    /// Obstacle that hit the player, if any
    pub collided: Option<u32>,
}

/// The live obstacle set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    /// Drop every obstacle, returning their ids
    pub fn clear(&mut self) -> Vec<u32> {
        self.obstacles.drain(..).map(|o| o.id).collect()
    }

    /// Add an obstacle directly (level scripting and tests)
    pub fn insert(&mut self, mut obstacle: Obstacle) -> u32 {
        obstacle.id = self.next_id.max(1);
        self.next_id = obstacle.id + 1;
        let id = obstacle.id;
        self.obstacles.push(obstacle);
        id
    }

    /// Spawn one obstacle just past the right edge. Taller obstacles become
    /// possible as the score grows; half of them bob.
    pub fn spawn<R: Rng>(
        &mut self,
        now: f64,
        score: u32,
        rng: &mut R,
        tuning: &Tuning,
    ) -> u32 {
        let height = uniform(rng, tuning.base_min_h, max_obstacle_height(score, tuning)).round();
        let width = uniform(rng, tuning.min_w, tuning.max_w).round();

        let bob = rng.random_bool(tuning.bob_chance).then(|| Bob {
            amplitude: uniform(rng, tuning.bob_min_amp, tuning.bob_max_amp),
            phase: uniform(rng, 0.0, TAU),
            angular_speed: uniform(rng, tuning.bob_min_speed, tuning.bob_max_speed),
        });

        let id = self.insert(Obstacle {
            id: 0,
            x: tuning.play_width + tuning.spawn_margin,
            width,
            height,
            spawned_at: now,
            bob,
            baseline: tuning.ground,
            bottom: tuning.ground,
        });
        log::debug!("Spawned obstacle {} ({}x{}, bob: {})", id, width, height, bob.is_some());
        id
    }

    /// Move every obstacle, test it against the player, and retire those
    /// that left the play area. Each retirement scores one point and
    /// re-derives the session speed.
    pub fn advance(
        &mut self,
        dt: f32,
        now: f64,
        player: &impl BoundsProvider,
        session: &mut SessionState,
        tuning: &Tuning,
    ) -> Advance {
        let mut result = Advance::default();
        let speed = session.speed;

        let mut i = 0;
        while i < self.obstacles.len() {
            let obstacle = &mut self.obstacles[i];
            obstacle.advance(dt, now, speed, tuning.bob_time_scale);

            if collides(player, &*obstacle) {
                result.collided = Some(obstacle.id);
                return result;
            }

            if obstacle.is_off_screen() {
                let retired = self.obstacles.remove(i);
                session.score += 1;
                session.speed = session.speed.max(speed_for_score(session.score, tuning));
                result.retired.push(retired.id);
                continue;
            }

            i += 1;
        }

        result
    }
}
