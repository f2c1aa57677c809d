//! Fixed-tick simulation step
//!
//! Advances one frame of a run, in order: jump/jetpack physics, entity
//! spawning, movement and pruning, collision and collection resolution,
//! scoring and speed progression. The host drives one tick per 16ms while
//! playing; in any other phase the tick is a complete no-op.

use rand::Rng;

use crate::config::Config;
use crate::consts::LANE_COUNT;

use super::collision::{coin_collectible, colliding_obstacle, power_up_collectible};
use super::state::{
    Coin, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, PowerUp, PowerUpKind,
};

/// Advance the game state by one tick.
pub fn tick(state: &mut GameState, config: &Config) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    step_character(state, config);
    spawn_entities(state, config);
    advance_entities(state, config);

    // A qualifying obstacle ends the run immediately; the rest of the tick
    // is skipped so the committed score is the score at the moment of impact.
    if let Some(id) = colliding_obstacle(&state.obstacles, &state.character, config) {
        state.phase = GamePhase::GameOver;
        state.cancel_slide_timer();
        state.events.push(GameEvent::Collision { id });
        log::info!("Run over: hit obstacle {} at score {}", id, state.score);
        return;
    }

    resolve_coins(state, config);
    resolve_power_ups(state, config);

    state.score += config.score_per_tick;
    state.game_speed = (state.game_speed + config.speed_increment).min(config.speed_cap);
}

/// Jump integration and jetpack countdown.
///
/// The jump is a per-tick velocity integration: the velocity starts at
/// `jump_power` (upward) and `gravity` pulls it back every tick, landing the
/// character at exactly offset 0 (59 ticks with the reference constants).
fn step_character(state: &mut GameState, config: &Config) {
    let ch = &mut state.character;

    if ch.is_jumping {
        ch.vertical_velocity += config.gravity;
        ch.vertical_offset += ch.vertical_velocity;
        if ch.vertical_offset >= 0.0 {
            ch.vertical_offset = 0.0;
            ch.vertical_velocity = 0.0;
            ch.is_jumping = false;
        }
    }

    if ch.has_jetpack {
        ch.jetpack_ticks_remaining = ch.jetpack_ticks_remaining.saturating_sub(1);
        if ch.jetpack_ticks_remaining == 0 {
            ch.has_jetpack = false;
        }
    }
}

/// Independent Bernoulli trial per category: rate draw, then lane, then kind.
fn spawn_entities(state: &mut GameState, config: &Config) {
    if state.rng.random::<f64>() < config.obstacle_spawn_rate {
        let lane = state.rng.random_range(0..LANE_COUNT);
        let kind = if state.rng.random_bool(0.5) {
            ObstacleKind::Train
        } else {
            ObstacleKind::Barrier
        };
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            lane,
            y: -config.obstacle_size,
            kind,
        });
    }

    if state.rng.random::<f64>() < config.coin_spawn_rate {
        let lane = state.rng.random_range(0..LANE_COUNT);
        let id = state.next_entity_id();
        state.coins.push(Coin {
            id,
            lane,
            y: -config.coin_size,
            collected: false,
        });
    }

    if state.rng.random::<f64>() < config.power_up_spawn_rate {
        let lane = state.rng.random_range(0..LANE_COUNT);
        let kind = if state.rng.random_bool(0.5) {
            PowerUpKind::Jetpack
        } else {
            PowerUpKind::Magnet
        };
        let id = state.next_entity_id();
        state.power_ups.push(PowerUp {
            id,
            lane,
            y: -config.power_up_size,
            kind,
        });
    }
}

/// Scroll every entity down by the current speed and prune the ones past the
/// bottom edge. Order-preserving; ids are never reused.
fn advance_entities(state: &mut GameState, config: &Config) {
    let speed = state.game_speed;
    let limit = config.game_height + config.prune_margin;

    for obstacle in &mut state.obstacles {
        obstacle.y += speed;
    }
    state.obstacles.retain(|o| o.y < limit);

    for coin in &mut state.coins {
        coin.y += speed;
    }
    state.coins.retain(|c| c.y < limit);

    for power_up in &mut state.power_ups {
        power_up.y += speed;
    }
    state.power_ups.retain(|p| p.y < limit);
}

/// Mark in-band coins collected and award score. Collected coins stay in the
/// list (they drive the pickup animation) but can never award again.
fn resolve_coins(state: &mut GameState, config: &Config) {
    let GameState {
        character,
        coins,
        coins_collected,
        score,
        events,
        ..
    } = state;

    for coin in coins.iter_mut() {
        if coin_collectible(coin, character, config) {
            coin.collected = true;
            *coins_collected += 1;
            *score += config.coin_score;
            events.push(GameEvent::CoinCollected { id: coin.id });
        }
    }
}

/// Remove in-band power-ups and apply their effects.
fn resolve_power_ups(state: &mut GameState, config: &Config) {
    // Collect first, apply after: effects mutate the character the retain
    // closure is matching against.
    let mut collected: Vec<PowerUpKind> = Vec::new();
    let GameState {
        character,
        power_ups,
        ..
    } = state;
    power_ups.retain(|p| {
        if power_up_collectible(p, character, config) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        match kind {
            PowerUpKind::Jetpack => {
                state.character.has_jetpack = true;
                state.character.jetpack_ticks_remaining = config.jetpack_duration_ticks;
            }
            // Announced but mechanically inert
            PowerUpKind::Magnet => {}
        }
        state.notify(kind);
        state.events.push(GameEvent::PowerUpCollected { kind });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference tuning with spawning disabled, for deterministic scenarios
    fn quiet_config() -> Config {
        Config {
            obstacle_spawn_rate: 0.0,
            coin_spawn_rate: 0.0,
            power_up_spawn_rate: 0.0,
            ..Config::default()
        }
    }

    fn playing_state(config: &Config, seed: u64) -> GameState {
        let mut state = GameState::new(config, seed);
        state.reset_run(config);
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_tick_is_noop_outside_playing() {
        let config = quiet_config();
        let mut state = GameState::new(&config, 1);

        for phase in [GamePhase::Menu, GamePhase::Paused, GamePhase::GameOver] {
            state.phase = phase;
            tick(&mut state, &config);
            assert_eq!(state.time_ticks, 0);
            assert_eq!(state.score, 0);
        }
    }

    #[test]
    fn test_score_and_speed_progression() {
        let config = quiet_config();
        let mut state = playing_state(&config, 1);

        for _ in 0..10 {
            tick(&mut state, &config);
        }
        assert_eq!(state.score, 10);
        assert_eq!(state.time_ticks, 10);
        let expected = config.initial_speed + 10.0 * config.speed_increment;
        assert!((state.game_speed - expected).abs() < 1e-4);
    }

    #[test]
    fn test_speed_clamped_to_cap() {
        let config = quiet_config();
        let mut state = playing_state(&config, 1);
        state.game_speed = config.speed_cap - 0.0005;

        for _ in 0..10 {
            tick(&mut state, &config);
        }
        assert_eq!(state.game_speed, config.speed_cap);
    }

    #[test]
    fn test_jump_lands_at_exactly_zero() {
        let config = quiet_config();
        let mut state = playing_state(&config, 1);
        state.jump(&config);

        // With jump_power -15 and gravity 0.5 the arc lands on tick 59
        for n in 1..=58 {
            tick(&mut state, &config);
            assert!(state.character.is_jumping, "still airborne at tick {}", n);
            assert!(state.character.vertical_offset < 0.0);
        }
        tick(&mut state, &config);
        assert!(!state.character.is_jumping);
        assert_eq!(state.character.vertical_offset, 0.0);
        assert_eq!(state.character.vertical_velocity, 0.0);
    }

    #[test]
    fn test_jetpack_expires_after_duration() {
        let config = quiet_config();
        let mut state = playing_state(&config, 1);
        state.character.has_jetpack = true;
        state.character.jetpack_ticks_remaining = config.jetpack_duration_ticks;

        for _ in 0..config.jetpack_duration_ticks - 1 {
            tick(&mut state, &config);
        }
        assert!(state.character.has_jetpack);
        assert_eq!(state.character.jetpack_ticks_remaining, 1);

        tick(&mut state, &config);
        assert!(!state.character.has_jetpack);
        assert_eq!(state.character.jetpack_ticks_remaining, 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_collision_ends_run_once() {
        let config = quiet_config();
        let mut state = playing_state(&config, 1);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            lane: 1,
            y: 480.0,
            kind: ObstacleKind::Train,
        });

        tick(&mut state, &config);
        assert_eq!(state.phase, GamePhase::GameOver);
        // Impact skips the rest of the tick: no survival point this frame
        assert_eq!(state.score, 0);
        assert_eq!(state.events, vec![GameEvent::Collision { id }]);

        // Game over is terminal for the run; further ticks are no-ops
        state.events.clear();
        tick(&mut state, &config);
        assert_eq!(state.time_ticks, 1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_jumping_character_passes_obstacle() {
        let config = quiet_config();
        let mut state = playing_state(&config, 1);
        state.jump(&config);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            lane: 1,
            y: 490.0,
            kind: ObstacleKind::Barrier,
        });

        tick(&mut state, &config);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_coin_collection_awards_once() {
        let config = quiet_config();
        let mut state = playing_state(&config, 1);
        let id = state.next_entity_id();
        state.coins.push(Coin {
            id,
            lane: 1,
            y: 490.0,
            collected: false,
        });

        tick(&mut state, &config);
        assert_eq!(state.coins_collected, 1);
        // +10 coin bonus, +1 survival
        assert_eq!(state.score, 11);
        assert!(state.coins[0].collected);
        assert_eq!(state.events, vec![GameEvent::CoinCollected { id }]);

        // The collected coin keeps scrolling but never awards again
        state.events.clear();
        tick(&mut state, &config);
        assert_eq!(state.coins_collected, 1);
        assert_eq!(state.score, 12);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_jetpack_power_up_applies() {
        let config = quiet_config();
        let mut state = playing_state(&config, 1);
        let id = state.next_entity_id();
        state.power_ups.push(PowerUp {
            id,
            lane: 1,
            y: 500.0,
            kind: PowerUpKind::Jetpack,
        });

        tick(&mut state, &config);
        assert!(state.power_ups.is_empty());
        assert!(state.character.has_jetpack);
        assert_eq!(
            state.character.jetpack_ticks_remaining,
            config.jetpack_duration_ticks
        );
        let notification = state.notification.unwrap();
        assert_eq!(notification.kind, PowerUpKind::Jetpack);
        assert_eq!(
            state.events,
            vec![GameEvent::PowerUpCollected {
                kind: PowerUpKind::Jetpack
            }]
        );
    }

    #[test]
    fn test_magnet_power_up_is_inert() {
        let config = quiet_config();
        let mut state = playing_state(&config, 1);
        let id = state.next_entity_id();
        state.power_ups.push(PowerUp {
            id,
            lane: 1,
            y: 500.0,
            kind: PowerUpKind::Magnet,
        });

        tick(&mut state, &config);
        assert!(state.power_ups.is_empty());
        assert!(!state.character.has_jetpack);
        assert_eq!(state.notification.unwrap().kind, PowerUpKind::Magnet);
    }

    #[test]
    fn test_entities_scroll_and_prune() {
        let config = quiet_config();
        let mut state = playing_state(&config, 1);
        let near = state.next_entity_id();
        let gone = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id: near,
            lane: 0,
            y: 100.0,
            kind: ObstacleKind::Train,
        });
        state.obstacles.push(Obstacle {
            id: gone,
            lane: 0,
            y: 649.0,
            kind: ObstacleKind::Train,
        });

        tick(&mut state, &config);
        // Positions strictly increase; past game_height + margin is pruned
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].id, near);
        assert_eq!(state.obstacles[0].y, 100.0 + config.initial_speed);
    }

    #[test]
    fn test_spawns_land_above_the_top_edge() {
        let config = Config {
            obstacle_spawn_rate: 1.0,
            coin_spawn_rate: 1.0,
            power_up_spawn_rate: 1.0,
            ..Config::default()
        };
        let mut state = playing_state(&config, 42);

        tick(&mut state, &config);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.coins.len(), 1);
        assert_eq!(state.power_ups.len(), 1);
        // Spawned above the top edge, then advanced once with the world
        let speed = config.initial_speed;
        assert_eq!(state.obstacles[0].y, -config.obstacle_size + speed);
        assert_eq!(state.coins[0].y, -config.coin_size + speed);
        assert_eq!(state.power_ups[0].y, -config.power_up_size + speed);
        assert!(state.obstacles[0].lane < 3);
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let config = Config::default();
        let mut a = playing_state(&config, 99999);
        let mut b = playing_state(&config, 99999);

        for _ in 0..500 {
            tick(&mut a, &config);
            tick(&mut b, &config);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.coins, b.coins);
        assert_eq!(a.power_ups, b.power_ups);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let config = Config::default();
        let mut a = playing_state(&config, 1);
        let mut b = playing_state(&config, 2);

        for _ in 0..500 {
            tick(&mut a, &config);
            tick(&mut b, &config);
        }

        // Entity streams under different seeds should not line up
        assert!(a.obstacles != b.obstacles || a.coins != b.coins);
    }
}
