//! Read-only state snapshot for the presentation layer
//!
//! Captured once per tick; the rendering layer draws from it and never
//! mutates engine state directly.

use serde::Serialize;

use super::state::{Character, Coin, GamePhase, GameState, Notification, Obstacle, PowerUp};

/// Immutable per-tick view of the world.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub character: Character,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    pub score: u64,
    pub coins_collected: u32,
    pub game_speed: f32,
    pub high_score: u64,
    pub notification: Option<Notification>,
}

impl Snapshot {
    /// Capture the current state plus the persisted high score.
    pub fn capture(state: &GameState, high_score: u64) -> Self {
        Self {
            phase: state.phase,
            character: state.character.clone(),
            obstacles: state.obstacles.clone(),
            coins: state.coins.clone(),
            power_ups: state.power_ups.clone(),
            score: state.score,
            coins_collected: state.coins_collected,
            game_speed: state.game_speed,
            high_score,
            notification: state.notification,
        }
    }
}
