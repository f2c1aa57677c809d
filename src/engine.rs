//! Simulation engine facade
//!
//! Wraps the pure simulation with the menu/playing/paused/game-over
//! lifecycle, routes discrete input events, validates wall-clock timer
//! callbacks, and commits the high score at the end of a run. Every call is
//! synchronous and non-blocking; illegal transition requests are no-ops.

use crate::config::Config;
use crate::highscore::HighScoreStore;
use crate::input::InputEvent;
use crate::sim::{self, GameEvent, GamePhase, GameState, Snapshot, TimerToken};

/// The simulation engine. Owns all game state; the host drives it with
/// input events, a periodic `tick`, and fired-back timer tokens.
pub struct Engine {
    state: GameState,
    config: Config,
    store: Box<dyn HighScoreStore>,
    high_score: u64,
}

impl Engine {
    /// Create an engine with the given tuning, persistence store, and RNG
    /// seed. The stored high score is read once, up front.
    pub fn new(config: Config, store: Box<dyn HighScoreStore>, seed: u64) -> Self {
        let high_score = store.load();
        Self {
            state: GameState::new(&config, seed),
            config,
            store,
            high_score,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Menu -> Playing, resetting all run state.
    pub fn start(&mut self) {
        if self.state.phase == GamePhase::Menu {
            self.begin_run();
        }
    }

    /// GameOver -> Playing, resetting all run state.
    pub fn restart(&mut self) {
        if self.state.phase == GamePhase::GameOver {
            self.begin_run();
        }
    }

    /// Playing -> Paused. Freezes tick processing; wall-clock timers
    /// (slide clear, banner dismiss) keep running.
    pub fn pause(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.state.phase = GamePhase::Paused;
        }
    }

    /// Paused -> Playing. The run resumes exactly where it froze.
    pub fn resume(&mut self) {
        if self.state.phase == GamePhase::Paused {
            self.state.phase = GamePhase::Playing;
        }
    }

    /// Paused/GameOver -> Menu, discarding the run.
    pub fn go_menu(&mut self) {
        if matches!(self.state.phase, GamePhase::Paused | GamePhase::GameOver) {
            self.state.reset_run(&self.config);
            self.state.phase = GamePhase::Menu;
            log::info!("Returned to menu");
        }
    }

    fn begin_run(&mut self) {
        self.state.reset_run(&self.config);
        self.state.phase = GamePhase::Playing;
        log::info!("Run {} started (seed {})", self.state.run, self.state.seed);
    }

    /// Route a discrete input event. Ignored outside `Playing`.
    ///
    /// A started slide returns the token the host must fire back via
    /// [`finish_slide`] after `config.slide_duration_ms` of wall-clock time.
    ///
    /// [`finish_slide`]: Engine::finish_slide
    pub fn handle_input(&mut self, event: InputEvent) -> Option<TimerToken> {
        if self.state.phase != GamePhase::Playing {
            return None;
        }
        match event {
            InputEvent::MoveLeft => {
                self.state.move_left();
                None
            }
            InputEvent::MoveRight => {
                self.state.move_right();
                None
            }
            InputEvent::Jump => {
                self.state.jump(&self.config);
                None
            }
            InputEvent::Slide => self.state.slide(),
        }
    }

    /// Advance one frame; returns the gameplay events raised this tick.
    ///
    /// When the tick ends the run, the high score is committed here, only
    /// if the final score beats the stored one.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        sim::tick(&mut self.state, &self.config);

        let mut events = std::mem::take(&mut self.state.events);
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::Collision { .. }))
        {
            let final_score = self.state.score;
            let new_high_score = final_score > self.high_score;
            if new_high_score {
                self.high_score = final_score;
                self.store.save(final_score);
                log::info!("New high score: {}", final_score);
            }
            events.push(GameEvent::GameOver {
                final_score,
                new_high_score,
            });
        }
        events
    }

    /// Wall-clock slide expiry. Stale tokens (older run, superseded slide)
    /// are ignored; a live token clears the slide even while paused.
    pub fn finish_slide(&mut self, token: TimerToken) {
        self.state.finish_slide(token);
    }

    /// Wall-clock banner expiry. Stale tokens are ignored.
    pub fn dismiss_notification(&mut self, token: TimerToken) {
        self.state.dismiss_notification(token);
    }

    /// Capture the current read-only view for the presentation layer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.high_score)
    }
}
