//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here; input handlers and the tick
//! are the only mutators.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::consts::LANE_COUNT;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no run in progress
    Menu,
    /// Active run, ticks advance the world
    Playing,
    /// Run frozen; wall-clock timers still land
    Paused,
    /// Run ended by a collision; state stays visible until restart/menu
    GameOver,
}

/// Obstacle kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Train,
    Barrier,
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    Jetpack,
    /// Collected and announced, but mechanically inert (no coin attraction)
    Magnet,
}

impl PowerUpKind {
    /// Banner text shown when collected
    pub fn banner(&self) -> &'static str {
        match self {
            PowerUpKind::Jetpack => "JETPACK!",
            PowerUpKind::Magnet => "MAGNET!",
        }
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Current lane (0..=2)
    pub lane: u8,
    /// Height above the ground anchor (0 = grounded, negative = airborne)
    pub vertical_offset: f32,
    /// Jump integration state
    pub vertical_velocity: f32,
    pub is_jumping: bool,
    pub is_sliding: bool,
    pub has_jetpack: bool,
    pub jetpack_ticks_remaining: u32,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            lane: 1,
            vertical_offset: 0.0,
            vertical_velocity: 0.0,
            is_jumping: false,
            is_sliding: false,
            has_jetpack: false,
            jetpack_ticks_remaining: 0,
        }
    }
}

impl Character {
    /// Airborne characters pass over obstacles. Sliding grants no immunity.
    pub fn is_immune(&self) -> bool {
        self.is_jumping || self.has_jetpack
    }
}

/// A lethal obstacle scrolling down one lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: u8,
    pub y: f32,
    pub kind: ObstacleKind,
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub lane: u8,
    pub y: f32,
    /// Collected coins stay in the list (driving the pickup animation)
    /// until pruned offscreen; they can never award again.
    pub collected: bool,
}

/// A collectible power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub lane: u8,
    pub y: f32,
    pub kind: PowerUpKind,
}

/// Token guarding a wall-clock one-shot (slide clear, banner dismiss).
///
/// Tokens from an earlier run, or superseded by a newer timer of the same
/// kind, are silently ignored when fired back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerToken {
    pub run: u32,
    pub seq: u32,
}

/// Transient power-up banner surfaced to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: PowerUpKind,
    /// Fire back via `dismiss_notification` after the configured delay
    pub token: TimerToken,
}

/// Gameplay events raised by a tick, drained by the engine each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    CoinCollected { id: u32 },
    PowerUpCollected { kind: PowerUpKind },
    Collision { id: u32 },
    GameOver { final_score: u64, new_high_score: bool },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub phase: GamePhase,
    /// Monotonic run id, incremented on every run reset; stale timer
    /// tokens are detected by comparing against this.
    pub run: u32,
    /// Tick counter for the current run
    pub time_ticks: u64,
    pub character: Character,
    /// Spawn-ordered entity lists; ids are never reused
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    pub score: u64,
    pub coins_collected: u32,
    pub game_speed: f32,
    /// Active power-up banner, if any
    pub notification: Option<Notification>,
    /// Events raised since the engine last drained them
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
    timer_seq: u32,
    /// The one live slide timer; older slide tokens no longer match
    slide_token: Option<TimerToken>,
}

impl GameState {
    /// Create an idle (menu) state with the given seed
    pub fn new(config: &Config, seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            run: 0,
            time_ticks: 0,
            character: Character::default(),
            obstacles: Vec::new(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            score: 0,
            coins_collected: 0,
            game_speed: config.initial_speed,
            notification: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            timer_seq: 0,
            slide_token: None,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset all run state ahead of a fresh run. The RNG keeps rolling so
    /// consecutive runs under one seed stay reproducible as a sequence.
    pub fn reset_run(&mut self, config: &Config) {
        self.run += 1;
        self.time_ticks = 0;
        self.character = Character::default();
        self.obstacles.clear();
        self.coins.clear();
        self.power_ups.clear();
        self.score = 0;
        self.coins_collected = 0;
        self.game_speed = config.initial_speed;
        self.notification = None;
        self.events.clear();
        self.slide_token = None;
    }

    /// Shift one lane left, clamped at the leftmost lane
    pub fn move_left(&mut self) {
        self.character.lane = self.character.lane.saturating_sub(1);
    }

    /// Shift one lane right, clamped at the rightmost lane
    pub fn move_right(&mut self) {
        self.character.lane = (self.character.lane + 1).min(LANE_COUNT - 1);
    }

    /// Start a jump. Ignored while airborne or jetpack-active.
    pub fn jump(&mut self, config: &Config) {
        let ch = &mut self.character;
        if ch.is_jumping || ch.has_jetpack {
            return;
        }
        ch.is_jumping = true;
        ch.vertical_offset = 0.0;
        ch.vertical_velocity = config.jump_power;
    }

    /// Start a slide. Ignored while airborne or jetpack-active.
    ///
    /// Returns the token the host must fire back via [`finish_slide`] after
    /// the configured wall-clock delay. Re-sliding mid-slide supersedes the
    /// pending timer.
    ///
    /// [`finish_slide`]: GameState::finish_slide
    pub fn slide(&mut self) -> Option<TimerToken> {
        if self.character.is_jumping || self.character.has_jetpack {
            return None;
        }
        self.character.is_sliding = true;
        let token = self.alloc_token();
        self.slide_token = Some(token);
        Some(token)
    }

    /// Wall-clock slide expiry. Stale tokens are ignored; a live token
    /// clears the slide even while paused.
    pub fn finish_slide(&mut self, token: TimerToken) {
        if self.slide_token == Some(token) {
            self.character.is_sliding = false;
            self.slide_token = None;
        }
    }

    /// Cancel the pending slide timer (run is ending; the frozen pose keeps
    /// whatever the character was doing at impact).
    pub(crate) fn cancel_slide_timer(&mut self) {
        self.slide_token = None;
    }

    /// Surface a power-up banner, replacing any current one
    pub(crate) fn notify(&mut self, kind: PowerUpKind) {
        let token = self.alloc_token();
        self.notification = Some(Notification { kind, token });
    }

    /// Wall-clock banner expiry. Stale tokens are ignored.
    pub fn dismiss_notification(&mut self, token: TimerToken) {
        if self.notification.map(|n| n.token) == Some(token) {
            self.notification = None;
        }
    }

    fn alloc_token(&mut self) -> TimerToken {
        self.timer_seq += 1;
        TimerToken {
            run: self.run,
            seq: self.timer_seq,
        }
    }
}
