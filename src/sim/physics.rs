//! Player jump physics
//!
//! Semi-implicit Euler in per-tick units: gravity, then optional hold thrust,
//! then position. Nothing is scaled by wall-clock delta; one call to
//! [`PlayerState::step`] is one display frame.

use serde::{Deserialize, Serialize};

use super::collision::{BoundsProvider, Rect};
use crate::tuning::Tuning;

/// Player vertical state plus the fixed box it occupies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Height of the player's feet above the ground baseline (never negative)
    pub height: f32,
    /// Vertical velocity (px per tick, positive is up)
    pub vy: f32,
    pub airborne: bool,
    /// Time the jump button has boosted the current jump
    pub hold_ms: f32,
    /// Fixed geometry copied from tuning at creation
    pub x: f32,
    pub width: f32,
    pub body_height: f32,
    pub ground: f32,
}

impl PlayerState {
    /// Grounded player at rest
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            height: 0.0,
            vy: 0.0,
            airborne: false,
            hold_ms: 0.0,
            x: tuning.player_x,
            width: tuning.player_width,
            body_height: tuning.player_height,
            ground: tuning.ground,
        }
    }

    /// Screen `bottom` offset of the player element
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.ground + self.height
    }

    /// Start a jump if grounded. Returns false (and changes nothing) when
    /// already airborne.
    pub fn apply_jump_start(&mut self, tuning: &Tuning) -> bool {
        if self.airborne {
            return false;
        }
        self.airborne = true;
        self.vy = tuning.jump_velocity;
        self.hold_ms = 0.0;
        true
    }

    /// Advance one tick. Holding the jump button while still rising adds
    /// thrust until the hold cap is used up, so taps give short hops.
    pub fn step(&mut self, hold: bool, tuning: &Tuning) {
        if !self.airborne {
            return;
        }

        self.vy -= tuning.gravity;
        if hold && self.hold_ms < tuning.max_hold_ms && self.vy > 0.0 {
            self.vy += tuning.hold_thrust;
            self.hold_ms += tuning.tick_ms;
        }

        self.height = (self.height + self.vy).max(0.0);
        if self.height <= 0.0 && self.vy <= 0.0 {
            self.land();
        }
    }

    fn land(&mut self) {
        self.height = 0.0;
        self.vy = 0.0;
        self.airborne = false;
        self.hold_ms = 0.0;
    }
}

impl BoundsProvider for PlayerState {
    fn bounds(&self) -> Rect {
        Rect::from_bottom_left(self.x, self.bottom(), self.width, self.body_height)
    }
}
