//! Lane Dash - a three-lane endless runner game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `engine`: Lifecycle state machine, input routing, timers, persistence
//! - `config`: Data-driven game tuning
//! - `highscore`: High score storage collaborators
//! - `input`: Keyboard and touch-zone classification

pub mod config;
pub mod engine;
pub mod highscore;
pub mod input;
pub mod sim;

pub use config::Config;
pub use engine::Engine;
pub use highscore::{HighScoreStore, MemoryStore};
pub use input::InputEvent;

/// Game structure constants
pub mod consts {
    /// Host tick interval in milliseconds (the simulation advances once per tick)
    pub const TICK_MS: u32 = 16;

    /// Number of lanes the character can occupy
    pub const LANE_COUNT: u8 = 3;
}
