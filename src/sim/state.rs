//! Game state and core simulation types
//!
//! One [`GameState`] value holds everything a session mutates, so a restart
//! is a plain reset and tests can drive the simulation without a display.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleField;
use super::physics::PlayerState;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Session ended by a collision, waiting for a restart
    GameOver,
}

/// Per-session counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u32,
    /// Scroll speed (px per tick)
    pub speed: f32,
    /// Frame-clock time the session started
    pub started_at: f64,
    /// Frame-clock time of the next spawn
    pub next_spawn_at: f64,
}

impl SessionState {
    pub fn new(tuning: &Tuning, now: f64) -> Self {
        Self {
            score: 0,
            speed: tuning.start_speed,
            started_at: now,
            next_spawn_at: now + tuning.first_spawn_delay_ms,
        }
    }

    /// Survival time so far
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.started_at).max(0.0)
    }
}

/// Things that happened during a tick, for the view to mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ObstacleSpawned { id: u32 },
    ObstacleRetired { id: u32 },
    Scored { score: u32 },
    Collided { obstacle: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub session: SessionState,
    pub player: PlayerState,
    pub obstacles: ObstacleField,
    /// Simulation ticks this session
    pub ticks: u64,
    /// Seed the RNG was built from
    pub seed: u64,
    pub rng: Pcg32,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh, idle state
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Idle,
            session: SessionState::new(tuning, 0.0),
            player: PlayerState::new(tuning),
            obstacles: ObstacleField::new(),
            ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Reset for a new session starting at `now`. Returns the ids of the
    /// obstacles that were cleared.
    pub fn reset(&mut self, now: f64, tuning: &Tuning) -> Vec<u32> {
        let cleared = self.obstacles.clear();
        self.session = SessionState::new(tuning, now);
        self.player = PlayerState::new(tuning);
        self.ticks = 0;
        self.events.clear();
        cleared
    }

    /// Take the queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
