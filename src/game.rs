//! Frame orchestrator
//!
//! [`Game`] owns the session, the input latches and the leaderboard, and is
//! driven by the host's frame scheduler through [`Game::frame`]. Each frame
//! updates the sky, runs one simulation tick if a session is live, and
//! mirrors the result onto the display list. Input events only flip latches
//! (plus an immediate jump start when grounded); the tick reads them.

use crate::ambient::sky_at;
use crate::clock::Clock;
use crate::display::{DisplayList, ElementId};
use crate::highscores::{HighScores, ScoreEntry, format_secs};
use crate::persistence::KeyValueStore;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Result of a finished session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionResult {
    pub entry: ScoreEntry,
    /// Leaderboard rank achieved (1-indexed)
    pub rank: Option<usize>,
}

/// Game instance holding all state
pub struct Game<S: KeyValueStore, C: Clock> {
    pub state: GameState,
    tuning: Tuning,
    store: S,
    clock: C,
    high_scores: HighScores,
    input: TickInput,
    /// Frame time the score "pop" class comes off
    score_pop_until: Option<f64>,
    last_result: Option<SessionResult>,
}

impl<S: KeyValueStore, C: Clock> Game<S, C> {
    pub fn new(tuning: Tuning, store: S, clock: C, seed: u64) -> Self {
        let high_scores = HighScores::load(&store);
        Self {
            state: GameState::new(seed, &tuning),
            tuning,
            store,
            clock,
            high_scores,
            input: TickInput::default(),
            score_pop_until: None,
            last_result: None,
        }
    }

    /// Load tuning overrides from the store and seed from the wall clock
    pub fn load(store: S, clock: C) -> Self {
        let tuning = Tuning::load(&store);
        let seed = clock.epoch_ms() as u64;
        log::info!("Game initialized with seed: {}", seed);
        Self::new(tuning, store, clock, seed)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn last_result(&self) -> Option<SessionResult> {
        self.last_result
    }

    pub fn input(&self) -> &TickInput {
        &self.input
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Width of the play area; new obstacles spawn past its right edge
    pub fn set_play_width(&mut self, width: f32) {
        if width > 0.0 {
            self.tuning.play_width = width;
        }
    }

    /// Initial view before the first start
    pub fn init_view(&self, display: &mut impl DisplayList) {
        display.set_position(ElementId::Player, None, self.state.player.bottom());
        display.set_text(ElementId::Score, "Score: 0");
        display.set_text(ElementId::Leaderboard, &self.high_scores.board_text());
        display.set_class(ElementId::Intro, "hidden", false);
    }

    /// Begin a session. Does nothing while one is running.
    pub fn start_game(&mut self, display: &mut impl DisplayList) -> bool {
        if self.is_running() {
            return false;
        }

        let now = self.clock.now_ms();
        for id in self.state.reset(now, &self.tuning) {
            display.remove(ElementId::Obstacle(id));
        }
        self.state.phase = GamePhase::Running;
        self.input.hold = false;
        self.score_pop_until = None;

        display.set_position(ElementId::Player, None, self.state.player.bottom());
        display.set_text(ElementId::Score, "Score: 0");
        display.set_class(ElementId::Score, "pop", false);
        display.set_class(ElementId::Intro, "hidden", true);

        log::info!("Session started at {:.0}ms", now);
        true
    }

    /// Freeze the running session without recording it. Safe to call when
    /// nothing is running.
    pub fn stop(&mut self) {
        if self.is_running() {
            self.state.phase = GamePhase::GameOver;
            log::info!("Session stopped");
        }
    }

    /// Enter / start button
    pub fn confirm_start(&mut self, display: &mut impl DisplayList) -> bool {
        self.start_game(display)
    }

    /// Jump button down: latch the hold and take off if grounded
    pub fn jump_pressed(&mut self) {
        self.input.hold = true;
        if self.is_running() {
            self.state.player.apply_jump_start(&self.tuning);
        }
    }

    /// Jump button up
    pub fn jump_released(&mut self) {
        self.input.hold = false;
    }

    /// Idle/demo mode toggle; returns the new setting
    pub fn toggle_autopilot(&mut self) -> bool {
        self.input.autopilot = !self.input.autopilot;
        log::info!("Autopilot: {}", self.input.autopilot);
        self.input.autopilot
    }

    /// One display frame at scheduler time `now`
    pub fn frame(&mut self, now: f64, display: &mut impl DisplayList) {
        self.update_sky(now, display);

        if let Some(until) = self.score_pop_until {
            if now >= until {
                display.set_class(ElementId::Score, "pop", false);
                self.score_pop_until = None;
            }
        }

        if !self.is_running() {
            return;
        }

        tick(&mut self.state, &self.input, now, &self.tuning);

        let mut collided = false;
        for event in self.state.drain_events() {
            match event {
                GameEvent::ObstacleSpawned { id } => {
                    if let Some(o) = self.state.obstacles.get(id) {
                        display.create_obstacle(id);
                        display.set_size(ElementId::Obstacle(id), o.width, o.height);
                    }
                }
                GameEvent::ObstacleRetired { id } => display.remove(ElementId::Obstacle(id)),
                GameEvent::Scored { score } => {
                    display.set_text(ElementId::Score, &format!("Score: {}", score));
                    display.set_class(ElementId::Score, "pop", true);
                    self.score_pop_until = Some(now + self.tuning.score_pop_ms);
                }
                GameEvent::Collided { .. } => collided = true,
            }
        }

        display.set_position(ElementId::Player, None, self.state.player.bottom());
        for o in &self.state.obstacles.obstacles {
            display.set_position(ElementId::Obstacle(o.id), Some(o.x), o.bottom);
        }

        if collided {
            self.game_over(now, display);
        }
    }

    fn update_sky(&self, now: f64, display: &mut impl DisplayList) {
        let sky = sky_at(now, self.tuning.cycle_ms);
        display.set_gradient(ElementId::Game, &sky.top.to_css(), &sky.bottom.to_css());
        display.set_opacity(ElementId::Sky, sky.star_opacity);
    }

    /// Record the finished session and show the retry overlay
    fn game_over(&mut self, now: f64, display: &mut impl DisplayList) {
        let entry = ScoreEntry {
            score: self.state.session.score,
            time: self.state.session.elapsed(now),
            ts: self.clock.epoch_ms(),
        };
        let (board, rank) = HighScores::record(&mut self.store, entry);
        self.high_scores = board;
        self.last_result = Some(SessionResult { entry, rank });

        log::info!(
            "Game over: score {} in {}s (rank {:?})",
            entry.score,
            format_secs(entry.time),
            rank
        );

        display.set_text(ElementId::Leaderboard, &self.high_scores.board_text());
        display.set_text(ElementId::IntroTitle, "Game Over");
        display.set_text(
            ElementId::IntroBody,
            &format!(
                "Score: {} - Time: {}s\nPress Enter or click Start Game to try again.",
                entry.score,
                format_secs(entry.time)
            ),
        );
        display.set_text(ElementId::StartButton, "Play Again");
        display.set_class(ElementId::Intro, "hidden", false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::display::{Command, CommandLog};
    use crate::persistence::MemoryStore;
    use crate::sim::Obstacle;

    const EPOCH: f64 = 1_700_000_000_000.0;

    fn game(clock: &ManualClock) -> Game<MemoryStore, &ManualClock> {
        Game::new(Tuning::default(), MemoryStore::new(), clock, 42)
    }

    fn blocker(x: f32) -> Obstacle {
        Obstacle {
            id: 0,
            x,
            width: 20.0,
            height: 60.0,
            spawned_at: 0.0,
            bob: None,
            baseline: 20.0,
            bottom: 20.0,
        }
    }

    #[test]
    fn test_start_is_idempotent() {
        let clock = ManualClock::new(EPOCH);
        let mut game = game(&clock);
        let mut display = CommandLog::new();

        clock.set(1000.0);
        assert!(game.start_game(&mut display));
        game.frame(1016.0, &mut display);
        let session = game.state.session.clone();

        clock.set(5000.0);
        assert!(!game.confirm_start(&mut display));
        assert_eq!(game.state.session, session);
        assert_eq!(display.last_class(ElementId::Intro, "hidden"), Some(true));
    }

    #[test]
    fn test_jump_only_takes_off_while_running() {
        let clock = ManualClock::new(EPOCH);
        let mut game = game(&clock);
        let mut display = CommandLog::new();

        game.jump_pressed();
        assert!(game.input().hold);
        assert!(!game.state.player.airborne);

        game.jump_released();
        game.start_game(&mut display);
        assert!(!game.input().hold);
        game.jump_pressed();
        assert!(game.state.player.airborne);
        assert_eq!(game.state.player.vy, game.tuning().jump_velocity);
    }

    #[test]
    fn test_sky_runs_while_idle() {
        let clock = ManualClock::new(EPOCH);
        let mut game = game(&clock);
        let mut display = CommandLog::new();

        game.frame(crate::consts::CYCLE_MS / 2.0, &mut display);
        assert_eq!(display.last_opacity(ElementId::Sky), Some(1.0));
        assert_eq!(display.count(|c| matches!(c, Command::Gradient(..))), 1);
        assert_eq!(game.state.ticks, 0);
    }

    #[test]
    fn test_spawn_creates_element() {
        let clock = ManualClock::new(EPOCH);
        let mut game = game(&clock);
        let mut display = CommandLog::new();

        game.start_game(&mut display);
        game.frame(700.0, &mut display);
        assert_eq!(game.state.obstacles.len(), 1);
        let id = game.state.obstacles.obstacles[0].id;
        assert!(display.commands.contains(&Command::CreateObstacle(id)));
    }

    #[test]
    fn test_scoring_pops_then_clears() {
        let clock = ManualClock::new(EPOCH);
        let mut game = game(&clock);
        let mut display = CommandLog::new();

        game.start_game(&mut display);
        game.state.session.next_spawn_at = f64::MAX;
        let id = game.state.obstacles.insert(blocker(-21.0));

        game.frame(16.0, &mut display);
        assert_eq!(game.state.session.score, 1);
        assert_eq!(display.last_text(ElementId::Score), Some("Score: 1"));
        assert_eq!(display.last_class(ElementId::Score, "pop"), Some(true));
        assert!(display.commands.contains(&Command::Remove(ElementId::Obstacle(id))));

        game.frame(100.0, &mut display);
        assert_eq!(display.last_class(ElementId::Score, "pop"), Some(true));
        game.frame(160.0, &mut display);
        assert_eq!(display.last_class(ElementId::Score, "pop"), Some(false));
    }

    #[test]
    fn test_collision_records_score_and_shows_retry() {
        let clock = ManualClock::new(EPOCH);
        let mut game = game(&clock);
        let mut display = CommandLog::new();

        clock.set(1000.0);
        game.start_game(&mut display);
        game.state.session.next_spawn_at = f64::MAX;
        game.state.session.score = 3;
        game.state.obstacles.insert(blocker(70.0));

        clock.set(5200.0);
        game.frame(5200.0, &mut display);
        assert_eq!(game.state.phase, GamePhase::GameOver);

        let result = game.last_result().unwrap();
        assert_eq!(result.entry.score, 3);
        assert_eq!(result.entry.time, 4200.0);
        assert_eq!(result.entry.ts, EPOCH + 5200.0);
        assert_eq!(result.rank, Some(1));

        assert_eq!(HighScores::load(&game.store).len(), 1);
        assert_eq!(display.last_text(ElementId::IntroTitle), Some("Game Over"));
        assert_eq!(display.last_text(ElementId::StartButton), Some("Play Again"));
        assert_eq!(
            display.last_text(ElementId::IntroBody),
            Some("Score: 3 - Time: 4.2s\nPress Enter or click Start Game to try again.")
        );
        assert_eq!(
            display.last_text(ElementId::Leaderboard),
            Some("Leaderboard\n1. 3 pts - 4.2s")
        );
        assert_eq!(display.last_class(ElementId::Intro, "hidden"), Some(false));

        // Frozen: more frames record nothing new
        game.frame(5216.0, &mut display);
        assert_eq!(HighScores::load(&game.store).len(), 1);
    }

    #[test]
    fn test_restart_clears_obstacles() {
        let clock = ManualClock::new(EPOCH);
        let mut game = game(&clock);
        let mut display = CommandLog::new();

        game.start_game(&mut display);
        game.state.session.next_spawn_at = f64::MAX;
        let id = game.state.obstacles.insert(blocker(70.0));
        game.frame(16.0, &mut display);
        assert!(!game.is_running());

        display.clear();
        assert!(game.start_game(&mut display));
        assert!(game.state.obstacles.is_empty());
        assert_eq!(game.state.session.score, 0);
        assert!(display.commands.contains(&Command::Remove(ElementId::Obstacle(id))));
    }

    #[test]
    fn test_stop_is_idempotent_and_freezes() {
        let clock = ManualClock::new(EPOCH);
        let mut game = game(&clock);
        let mut display = CommandLog::new();

        game.stop();
        assert_eq!(game.state.phase, GamePhase::Idle);

        game.start_game(&mut display);
        game.stop();
        game.stop();
        assert!(!game.is_running());

        game.frame(5000.0, &mut display);
        assert_eq!(game.state.ticks, 0);
        assert!(game.last_result().is_none());
        assert!(HighScores::load(&game.store).is_empty());
    }

    #[test]
    fn test_init_view_shows_stored_board() {
        let clock = ManualClock::new(EPOCH);
        let mut store = MemoryStore::new();
        store
            .set(HighScores::STORAGE_KEY, r#"[{"score":9,"time":12000,"ts":0}]"#)
            .unwrap();
        let game = Game::new(Tuning::default(), store, &clock, 1);
        let mut display = CommandLog::new();

        game.init_view(&mut display);
        assert_eq!(
            display.last_text(ElementId::Leaderboard),
            Some("Leaderboard\n1. 9 pts - 12.0s")
        );
        assert_eq!(display.last_class(ElementId::Intro, "hidden"), Some(false));
    }
}
