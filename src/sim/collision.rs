//! Lane-indexed collision and collection checks
//!
//! All checks are distance bands around a fixed character anchor near the
//! bottom of the play area. An entity qualifies when it shares the
//! character's lane and sits strictly inside the band.

use crate::config::Config;

use super::state::{Character, Coin, Obstacle, PowerUp};

/// True when `y` lies strictly within `band` of `anchor`.
pub fn in_band(y: f32, anchor: f32, band: f32) -> bool {
    y > anchor - band && y < anchor + band
}

/// First obstacle that ends the run, if any.
///
/// Jumping or jetpack-active characters are immune; sliding is not. Only the
/// first hit matters since the transition to game over is terminal.
pub fn colliding_obstacle(
    obstacles: &[Obstacle],
    character: &Character,
    config: &Config,
) -> Option<u32> {
    if character.is_immune() {
        return None;
    }
    let anchor = config.anchor_y();
    obstacles
        .iter()
        .find(|o| o.lane == character.lane && in_band(o.y, anchor, config.obstacle_band))
        .map(|o| o.id)
}

/// True when the coin is collectible by the character this tick.
///
/// Collection is unconditional on the character's pose; only `collected`
/// coins are excluded, so each coin awards at most once.
pub fn coin_collectible(coin: &Coin, character: &Character, config: &Config) -> bool {
    !coin.collected
        && coin.lane == character.lane
        && in_band(coin.y, config.anchor_y(), config.pickup_band)
}

/// True when the power-up is collectible by the character this tick.
pub fn power_up_collectible(power_up: &PowerUp, character: &Character, config: &Config) -> bool {
    power_up.lane == character.lane && in_band(power_up.y, config.anchor_y(), config.pickup_band)
}
