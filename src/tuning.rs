//! Game balance values
//!
//! Every tunable lives here so a stored JSON override can rebalance the game
//! without a rebuild. Missing fields fall back to the defaults in [`consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::KeyValueStore;

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub ground: f32,
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub hold_thrust: f32,
    pub max_hold_ms: f32,
    pub tick_ms: f32,

    // === Speed ===
    pub start_speed: f32,
    pub speed_per_point: f32,
    pub max_speed: f32,

    // === Obstacles ===
    pub base_min_h: f32,
    pub base_max_h: f32,
    pub height_per_point: f32,
    pub max_extra_height: f32,
    pub min_w: f32,
    pub max_w: f32,
    pub bob_chance: f64,
    pub bob_min_amp: f32,
    pub bob_max_amp: f32,
    pub bob_min_speed: f32,
    pub bob_max_speed: f32,
    pub bob_time_scale: f32,

    // === Spawning ===
    pub spawn_min_ms: f64,
    pub spawn_max_ms: f64,
    pub extra_difficulty: f64,
    pub max_gap_shrink_ms: f64,
    pub min_gap_floor_ms: f64,
    pub max_gap_floor_ms: f64,
    pub first_spawn_delay_ms: f64,
    pub spawn_margin: f32,

    // === Presentation ===
    pub play_width: f32,
    pub cycle_ms: f64,
    pub score_pop_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ground: GROUND_PX,
            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            hold_thrust: HOLD_THRUST,
            max_hold_ms: MAX_HOLD_MS,
            tick_ms: TICK_MS,

            start_speed: START_SPEED,
            speed_per_point: SPEED_PER_POINT,
            max_speed: MAX_SPEED,

            base_min_h: BASE_MIN_H,
            base_max_h: BASE_MAX_H,
            height_per_point: HEIGHT_PER_POINT,
            max_extra_height: MAX_EXTRA_HEIGHT,
            min_w: MIN_W,
            max_w: MAX_W,
            bob_chance: BOB_CHANCE,
            bob_min_amp: BOB_MIN_AMP,
            bob_max_amp: BOB_MAX_AMP,
            bob_min_speed: BOB_MIN_SPEED,
            bob_max_speed: BOB_MAX_SPEED,
            bob_time_scale: BOB_TIME_SCALE,

            spawn_min_ms: SPAWN_MIN_MS,
            spawn_max_ms: SPAWN_MAX_MS,
            extra_difficulty: EXTRA_DIFFICULTY,
            max_gap_shrink_ms: MAX_GAP_SHRINK_MS,
            min_gap_floor_ms: MIN_GAP_FLOOR_MS,
            max_gap_floor_ms: MAX_GAP_FLOOR_MS,
            first_spawn_delay_ms: FIRST_SPAWN_DELAY_MS,
            spawn_margin: SPAWN_MARGIN,

            play_width: PLAY_WIDTH,
            cycle_ms: CYCLE_MS,
            score_pop_ms: SCORE_POP_MS,
        }
    }
}

/// Replace each listed non-finite field with its default
macro_rules! finite_or_default {
    ($tuning:ident, $defaults:ident, $($field:ident),+ $(,)?) => {
        $(
            if !$tuning.$field.is_finite() {
                log::warn!("Tuning `{}` is not finite, using default", stringify!($field));
                $tuning.$field = $defaults.$field;
            }
        )+
    };
}

/// Order a (min, max) pair
fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a > b { (b, a) } else { (a, b) }
}

impl Tuning {
    /// Storage key for overrides
    pub const STORAGE_KEY: &'static str = "dusk_dash_tuning";

    /// Repair values that would break the simulation (non-finite numbers,
    /// inverted ranges, negative speeds, a zero-length cycle)
    pub fn validated(mut self) -> Self {
        let defaults = Tuning::default();
        finite_or_default!(
            self, defaults,
            ground, player_x, player_width, player_height,
            jump_velocity, gravity, hold_thrust, max_hold_ms, tick_ms,
            start_speed, speed_per_point, max_speed,
            base_min_h, base_max_h, height_per_point, max_extra_height, min_w, max_w,
            bob_chance, bob_min_amp, bob_max_amp, bob_min_speed, bob_max_speed, bob_time_scale,
            spawn_min_ms, spawn_max_ms, extra_difficulty, max_gap_shrink_ms,
            min_gap_floor_ms, max_gap_floor_ms, first_spawn_delay_ms, spawn_margin,
            play_width, cycle_ms, score_pop_ms,
        );

        (self.base_min_h, self.base_max_h) = ordered(self.base_min_h, self.base_max_h);
        (self.min_w, self.max_w) = ordered(self.min_w, self.max_w);
        (self.bob_min_amp, self.bob_max_amp) = ordered(self.bob_min_amp, self.bob_max_amp);
        (self.bob_min_speed, self.bob_max_speed) =
            ordered(self.bob_min_speed, self.bob_max_speed);
        (self.spawn_min_ms, self.spawn_max_ms) = ordered(self.spawn_min_ms, self.spawn_max_ms);
        (self.min_gap_floor_ms, self.max_gap_floor_ms) =
            ordered(self.min_gap_floor_ms, self.max_gap_floor_ms);

        self.start_speed = self.start_speed.max(0.0);
        self.speed_per_point = self.speed_per_point.max(0.0);
        self.max_speed = self.max_speed.max(self.start_speed);
        self.gravity = self.gravity.max(0.0);
        self.bob_chance = self.bob_chance.clamp(0.0, 1.0);
        self.ground = self.ground.max(0.0);
        if self.cycle_ms <= 0.0 {
            self.cycle_ms = CYCLE_MS;
        }
        self
    }

    /// Load overrides from storage, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Tuning>(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    return tuning.validated();
                }
                Err(e) => log::warn!("Ignoring invalid tuning overrides: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read tuning overrides: {}", e),
        }

        log::info!("Using default tuning");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let mut store = MemoryStore::new();
        store
            .set(Tuning::STORAGE_KEY, r#"{"max_speed": 9.0, "cycle_ms": 1000}"#)
            .unwrap();

        let tuning = Tuning::load(&store);
        assert_eq!(tuning.max_speed, 9.0);
        assert_eq!(tuning.cycle_ms, 1000.0);
        assert_eq!(tuning.start_speed, START_SPEED);
        assert_eq!(tuning.gravity, GRAVITY);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        let mut store = MemoryStore::new();
        store.set(Tuning::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(Tuning::load(&store), Tuning::default());
    }

    #[test]
    fn test_missing_key_uses_defaults() {
        assert_eq!(Tuning::load(&MemoryStore::new()), Tuning::default());
    }

    #[test]
    fn test_overflowing_override_is_replaced() {
        let mut store = MemoryStore::new();
        store
            .set(Tuning::STORAGE_KEY, r#"{"max_w": 1e300, "min_w": -1e300, "bob_max_amp": 1e40}"#)
            .unwrap();

        let tuning = Tuning::load(&store);
        assert_eq!(tuning.max_w, MAX_W);
        assert_eq!(tuning.min_w, MIN_W);
        assert_eq!(tuning.bob_max_amp, BOB_MAX_AMP);

        // Spawning with the loaded tuning stays in range
        let mut state = crate::sim::GameState::new(3, &tuning);
        state.reset(0.0, &tuning);
        state.phase = crate::sim::GamePhase::Running;
        crate::sim::tick(&mut state, &crate::sim::TickInput::default(), 1000.0, &tuning);
        let o = &state.obstacles.obstacles[0];
        assert!(o.width >= MIN_W && o.width <= MAX_W);
    }

    #[test]
    fn test_uniform_tolerates_unbounded_ranges() {
        use rand::SeedableRng;
        let mut rng = rand_pcg::Pcg32::seed_from_u64(9);
        assert_eq!(crate::uniform(&mut rng, 16.0, f32::INFINITY), 16.0);
        assert_eq!(crate::uniform(&mut rng, -f32::MAX, f32::MAX), -f32::MAX);
        assert_eq!(crate::uniform_ms(&mut rng, 900.0, f64::INFINITY), 900.0);
    }

    #[test]
    fn test_validated_repairs_ranges() {
        let tuning = Tuning {
            min_w: 40.0,
            max_w: 10.0,
            start_speed: -1.0,
            max_speed: -5.0,
            cycle_ms: 0.0,
            bob_chance: 3.0,
            ..Default::default()
        }
        .validated();

        assert_eq!((tuning.min_w, tuning.max_w), (10.0, 40.0));
        assert_eq!(tuning.start_speed, 0.0);
        assert_eq!(tuning.max_speed, 0.0);
        assert_eq!(tuning.cycle_ms, CYCLE_MS);
        assert_eq!(tuning.bob_chance, 1.0);
    }
}
