//! Game state and core simulation types
//!
//! All state that must be carried across ticks lives here, including the
//! RNG, so a cloned or deserialized state replays identically.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{EnemyTank, PlayerTank, Projectile};
use super::geometry::Size;
use super::level::Level;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player health reached zero
    GameOver,
    /// Every enemy destroyed
    Cleared,
}

/// How a level ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    GameOver,
    Cleared,
}

/// Notable things that happened during a tick, drained by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32 },
    /// A player shell destroyed an enemy (the hit cue plays once per event)
    EnemyDestroyed { id: u32 },
    PlayerHit { health: u32 },
    Finished(Outcome),
}

/// Entity sizes, from loaded assets or the geometric defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySizes {
    pub tank: Size,
    pub projectile: Size,
}

impl Default for EntitySizes {
    fn default() -> Self {
        Self {
            tank: Size::square(TANK_SIZE),
            projectile: Size::square(PROJECTILE_SIZE),
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// The single RNG every random draw comes from
    pub rng: Pcg32,
    pub level: Level,
    pub sizes: EntitySizes,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Milliseconds since the last enemy spawn
    pub spawn_timer_ms: u32,
    pub player: PlayerTank,
    /// Live enemies in creation order
    pub enemies: Vec<EnemyTank>,
    pub player_projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Start `level` with the player at bottom-center and one enemy on the top edge
    pub fn new(level: Level, seed: u64, sizes: EntitySizes) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level,
            sizes,
            time_ticks: 0,
            phase: GamePhase::Playing,
            spawn_timer_ms: 0,
            player: PlayerTank::spawn(level.initial_health(), sizes.tank),
            enemies: Vec::new(),
            player_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        state.spawn_enemy();
        log::info!(
            "Level {} started: health={}, spawn every {}ms",
            level.index(),
            state.player.health,
            level.spawn_interval_ms()
        );

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn an enemy at a random x along the top edge
    pub fn spawn_enemy(&mut self) -> u32 {
        let id = self.next_entity_id();
        let x = self.rng.random_range(0..(ARENA_WIDTH - self.sizes.tank.w).max(1));
        self.enemies.push(EnemyTank::spawn(id, x, self.sizes.tank));
        self.events.push(GameEvent::EnemySpawned { id });
        log::debug!("Enemy {} spawned at x={}", id, x);
        id
    }

    pub fn is_finished(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Playing => None,
            GamePhase::GameOver => Some(Outcome::GameOver),
            GamePhase::Cleared => Some(Outcome::Cleared),
        }
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
