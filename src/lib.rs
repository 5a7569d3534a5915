//! Dusk Dash - An endless side-scrolling jump game
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (jump physics, obstacles, collisions, scoring)
//! - `ambient`: Day/night sky cycle, driven only by the clock
//! - `game`: Frame orchestrator tying the simulation to the display and leaderboard
//! - `display`: Primitive display commands (the view is a retained display list)
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `tuning`: Data-driven game balance

pub mod ambient;
pub mod clock;
pub mod display;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::{HighScores, ScoreEntry};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Nominal duration of one simulation tick (one display frame at 60 Hz)
    pub const TICK_MS: f32 = 16.0;

    /// Ground strip height; the baseline everything stands on
    pub const GROUND_PX: f32 = 20.0;

    /// Player box, anchored at a fixed horizontal position
    pub const PLAYER_X: f32 = 60.0;
    pub const PLAYER_WIDTH: f32 = 34.0;
    pub const PLAYER_HEIGHT: f32 = 34.0;

    /// Jump physics (per-tick units)
    pub const JUMP_VELOCITY: f32 = 10.5;
    pub const GRAVITY: f32 = 0.55;
    pub const HOLD_THRUST: f32 = 0.35;
    pub const MAX_HOLD_MS: f32 = 180.0;

    /// Horizontal scroll speed (px per tick)
    pub const START_SPEED: f32 = 2.6;
    pub const SPEED_PER_POINT: f32 = 0.10;
    pub const MAX_SPEED: f32 = 7.0;

    /// Obstacle size ranges (px)
    pub const BASE_MIN_H: f32 = 20.0;
    pub const BASE_MAX_H: f32 = 48.0;
    /// Extra height range per point of score, capped
    pub const HEIGHT_PER_POINT: f32 = 2.0;
    pub const MAX_EXTRA_HEIGHT: f32 = 20.0;
    pub const MIN_W: f32 = 16.0;
    pub const MAX_W: f32 = 34.0;

    /// Obstacle bobbing
    pub const BOB_CHANCE: f64 = 0.5;
    pub const BOB_MIN_AMP: f32 = 4.0;
    pub const BOB_MAX_AMP: f32 = 12.0;
    pub const BOB_MIN_SPEED: f32 = 0.08;
    pub const BOB_MAX_SPEED: f32 = 0.16;
    /// Scale from milliseconds to bob phase units
    pub const BOB_TIME_SCALE: f32 = 0.01;

    /// Spawn scheduling (ms)
    pub const SPAWN_MIN_MS: f64 = 900.0;
    pub const SPAWN_MAX_MS: f64 = 1600.0;
    pub const EXTRA_DIFFICULTY: f64 = 0.6;
    pub const MAX_GAP_SHRINK_MS: f64 = 400.0;
    pub const MIN_GAP_FLOOR_MS: f64 = 500.0;
    pub const MAX_GAP_FLOOR_MS: f64 = 800.0;
    pub const FIRST_SPAWN_DELAY_MS: f64 = 700.0;
    /// Obstacles appear this far beyond the right edge
    pub const SPAWN_MARGIN: f32 = 20.0;

    /// Default play area width until the host reports the real one
    pub const PLAY_WIDTH: f32 = 800.0;

    /// Full day -> night -> day period
    pub const CYCLE_MS: f64 = 30_000.0;

    /// How long the score HUD keeps its "pop" class
    pub const SCORE_POP_MS: f64 = 140.0;

    /// Leaderboard size
    pub const MAX_HIGH_SCORES: usize = 5;
}

/// Uniform draw from `[lo, hi)`. Empty or non-finite ranges yield `lo`.
#[inline]
pub fn uniform<R: rand::Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi <= lo || !(hi - lo).is_finite() { lo } else { rng.random_range(lo..hi) }
}

/// Uniform draw from `[lo, hi)` in milliseconds, same fallback as [`uniform`]
#[inline]
pub fn uniform_ms<R: rand::Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi <= lo || !(hi - lo).is_finite() { lo } else { rng.random_range(lo..hi) }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
