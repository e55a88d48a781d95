//! Tank Arena - A single-player arcade tank combat simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, enemy AI, projectiles, game state)
//! - `input`: Held movement intents and edge-triggered fire requests
//! - `render`: Read-only snapshots for a presentation layer
//! - `audio`: Fire-and-forget hit cue boundary
//! - `session`: Fixed-timestep driver, level selection and restarts
//! - `settings`: Data-driven configuration

pub mod audio;
pub mod error;
pub mod input;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default fixed tick length in milliseconds
    pub const DEFAULT_TICK_MS: u32 = 10;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions (logical units)
    pub const ARENA_WIDTH: i32 = 800;
    pub const ARENA_HEIGHT: i32 = 600;

    /// Tank defaults
    pub const TANK_SIZE: i32 = 40;
    pub const PLAYER_SPEED: i32 = 5;
    pub const ENEMY_SPEED: i32 = 3;
    /// Player spawns this far above the bottom edge
    pub const PLAYER_SPAWN_BOTTOM_OFFSET: i32 = 50;

    /// Projectile defaults
    pub const PROJECTILE_SIZE: i32 = 15;
    pub const PROJECTILE_SPEED: i32 = 10;

    /// Enemy AI timing (ticks)
    pub const STRATEGY_CHANGE_TICKS: u32 = 300;
    pub const AMBUSH_TICKS: u32 = 120;
    pub const ENEMY_FIRE_TICKS: u32 = 60;

    /// Enemy AI tuning
    pub const RANDOM_TURN_PERCENT: u32 = 5;
    pub const SEEK_JINK_DISTANCE: f64 = 150.0;
    pub const RETREAT_MARGIN: i32 = 50;
    pub const PATROL_WAYPOINTS: [(i32, i32); 4] = [(200, 150), (600, 150), (600, 450), (200, 450)];
}

/// Clamp a top-left position so an entity of the given size stays inside the arena
#[inline]
pub fn clamp_to_arena(pos: glam::IVec2, size: sim::Size) -> glam::IVec2 {
    use consts::{ARENA_HEIGHT, ARENA_WIDTH};
    glam::IVec2::new(
        pos.x.min(ARENA_WIDTH - size.w).max(0),
        pos.y.min(ARENA_HEIGHT - size.h).max(0),
    )
}
