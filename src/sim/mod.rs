//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed per-frame tick, no wall-clock scaling
//! - Seeded RNG only
//! - No display or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{BoundsProvider, Rect, collides};
pub use difficulty::{SpawnGap, max_obstacle_height, spawn_gap_bounds, speed_for_score};
pub use obstacle::{Advance, Bob, Obstacle, ObstacleField};
pub use physics::PlayerState;
pub use state::{GameEvent, GamePhase, GameState, SessionState};
pub use tick::{TickInput, tick};
