//! Difficulty curve: scroll speed and spawn gaps as pure functions of score

use crate::tuning::Tuning;

/// Scroll speed for a score, capped at the maximum
pub fn speed_for_score(score: u32, tuning: &Tuning) -> f32 {
    (tuning.start_speed + score as f32 * tuning.speed_per_point).min(tuning.max_speed)
}

/// Bounds for the delay before the next spawn (ms)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnGap {
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Spawn gaps shrink linearly with score down to fixed floors
pub fn spawn_gap_bounds(score: u32, tuning: &Tuning) -> SpawnGap {
    let shrink = (score as f64 * tuning.extra_difficulty * 10.0).min(tuning.max_gap_shrink_ms);
    SpawnGap {
        min_ms: (tuning.spawn_min_ms - shrink).max(tuning.min_gap_floor_ms),
        max_ms: (tuning.spawn_max_ms - shrink).max(tuning.max_gap_floor_ms),
    }
}

/// Upper bound of the obstacle height range for a score
pub fn max_obstacle_height(score: u32, tuning: &Tuning) -> f32 {
    tuning.base_max_h + (score as f32 * tuning.height_per_point).min(tuning.max_extra_height)
}
