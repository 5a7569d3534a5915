//! Time sources
//!
//! The frame scheduler hands each frame its own timestamp; a [`Clock`] covers
//! the moments outside a frame (session start) and the wall-clock stamp put
//! on leaderboard entries.

use std::cell::Cell;

/// Monotonic and wall-clock time in milliseconds
pub trait Clock {
    /// Monotonic time, same timeline as frame timestamps
    fn now_ms(&self) -> f64;
    /// Milliseconds since the Unix epoch
    fn epoch_ms(&self) -> f64;
}

/// Hand-driven clock for tests and the headless runner
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
    epoch_base: f64,
}

impl ManualClock {
    pub fn new(epoch_base: f64) -> Self {
        Self {
            now: Cell::new(0.0),
            epoch_base,
        }
    }

    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    pub fn advance(&self, ms: f64) -> f64 {
        let now = self.now.get() + ms;
        self.now.set(now);
        now
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    fn epoch_ms(&self) -> f64 {
        self.epoch_base + self.now.get()
    }
}

/// `performance.now()` / `Date.now()`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserClock;

#[cfg(target_arch = "wasm32")]
impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn epoch_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }

    fn epoch_ms(&self) -> f64 {
        (**self).epoch_ms()
    }
}
