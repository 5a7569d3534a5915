//! Day/night sky cycle
//!
//! A pure function of the clock: the sky blends from day to night over the
//! first half of the cycle and back over the second half, whatever the game
//! is doing.

use serde::{Deserialize, Serialize};

use crate::lerp;

/// HSL color (hue in degrees, saturation and lightness in percent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Per-channel linear blend
    pub fn lerp(self, other: Hsl, t: f32) -> Hsl {
        Hsl {
            h: lerp(self.h, other.h, t),
            s: lerp(self.s, other.s, t),
            l: lerp(self.l, other.l, t),
        }
    }

    /// CSS `hsl()` notation
    pub fn to_css(&self) -> String {
        format!("hsl({:.1}, {:.1}%, {:.1}%)", self.h, self.s, self.l)
    }
}

pub const DAY_TOP: Hsl = Hsl::new(200.0, 100.0, 85.0);
pub const DAY_BOTTOM: Hsl = Hsl::new(190.0, 100.0, 92.0);
pub const NIGHT_TOP: Hsl = Hsl::new(230.0, 60.0, 12.0);
pub const NIGHT_BOTTOM: Hsl = Hsl::new(230.0, 50.0, 20.0);

/// Night factor at time `t`: 0 at day, rising to 1 at mid-cycle, back to 0
pub fn cycle_factor(t: f64, cycle_ms: f64) -> f32 {
    if cycle_ms <= 0.0 {
        return 0.0;
    }
    let phase = t.rem_euclid(cycle_ms) / cycle_ms;
    let t01 = if phase < 0.5 {
        phase / 0.5
    } else {
        1.0 - (phase - 0.5) / 0.5
    };
    (t01 as f32).clamp(0.0, 1.0)
}

/// Everything the sky needs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyFrame {
    pub top: Hsl,
    pub bottom: Hsl,
    /// Star overlay opacity, brightest at peak night
    pub star_opacity: f32,
}

/// Sky colors at time `t`
pub fn sky_at(t: f64, cycle_ms: f64) -> SkyFrame {
    let night = cycle_factor(t, cycle_ms);
    SkyFrame {
        top: DAY_TOP.lerp(NIGHT_TOP, night),
        bottom: DAY_BOTTOM.lerp(NIGHT_BOTTOM, night),
        star_opacity: night,
    }
}
