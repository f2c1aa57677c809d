//! Game tuning configuration
//!
//! Every gameplay tunable lives here and is handed to the engine at
//! construction. Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

/// Complete tuning for one engine instance.
///
/// `Default` is the reference balance; hosts may load a persisted override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Field geometry (pixels) ===
    pub game_width: f32,
    pub game_height: f32,
    pub character_size: f32,
    pub obstacle_size: f32,
    pub coin_size: f32,
    pub power_up_size: f32,

    // === Scroll speed ===
    pub initial_speed: f32,
    /// Added to the scroll speed every tick, up to `speed_cap`
    pub speed_increment: f32,
    pub speed_cap: f32,

    // === Jump physics ===
    /// Initial vertical velocity on jump (negative = upward)
    pub jump_power: f32,
    /// Per-tick velocity pull back toward the ground
    pub gravity: f32,

    // === Spawning (independent Bernoulli trial per tick per category) ===
    pub obstacle_spawn_rate: f64,
    pub coin_spawn_rate: f64,
    pub power_up_spawn_rate: f64,

    // === Collision geometry ===
    /// Character anchor measured up from the bottom edge
    pub anchor_offset: f32,
    /// Obstacles within this distance of the anchor are lethal
    pub obstacle_band: f32,
    /// Coins and power-ups within this distance of the anchor are collected
    pub pickup_band: f32,
    /// Entities this far past the bottom edge are pruned
    pub prune_margin: f32,

    // === Scoring ===
    pub score_per_tick: u64,
    pub coin_score: u64,

    // === Timed effects ===
    pub jetpack_duration_ticks: u32,
    /// Slide auto-clear delay, wall-clock (runs through pauses)
    pub slide_duration_ms: u32,
    /// Power-up banner auto-dismiss delay, wall-clock
    pub notification_duration_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game_width: 400.0,
            game_height: 600.0,
            character_size: 40.0,
            obstacle_size: 60.0,
            coin_size: 20.0,
            power_up_size: 30.0,

            initial_speed: 2.0,
            speed_increment: 0.001,
            speed_cap: 8.0,

            jump_power: -15.0,
            gravity: 0.5,

            obstacle_spawn_rate: 0.02,
            coin_spawn_rate: 0.03,
            power_up_spawn_rate: 0.005,

            anchor_offset: 100.0,
            obstacle_band: 60.0,
            pickup_band: 40.0,
            prune_margin: 50.0,

            score_per_tick: 1,
            coin_score: 10,

            jetpack_duration_ticks: 300,
            slide_duration_ms: 800,
            notification_duration_ms: 2000,
        }
    }
}

impl Config {
    /// Vertical position of the character anchor used for all band checks
    pub fn anchor_y(&self) -> f32 {
        self.game_height - self.anchor_offset
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "lane_dash_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(config) = serde_json::from_str(&json) {
                    log::info!("Loaded config from LocalStorage");
                    return config;
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Config saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
