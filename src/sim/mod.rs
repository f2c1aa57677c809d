//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only (the host drives one tick per 16ms)
//! - Seeded RNG only
//! - Stable entity iteration order (spawn order, ids never reused)
//! - No rendering or platform dependencies

pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{colliding_obstacle, in_band};
pub use snapshot::Snapshot;
pub use state::{
    Character, Coin, GameEvent, GamePhase, GameState, Notification, Obstacle, ObstacleKind,
    PowerUp, PowerUpKind, TimerToken,
};
pub use tick::tick;
