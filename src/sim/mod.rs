//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (creation order)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod entity;
pub mod geometry;
pub mod level;
pub mod state;
pub mod tick;

pub use ai::{AiState, Strategy};
pub use entity::{Direction, EnemyTank, Owner, PlayerTank, Projectile, Tank, TankBody};
pub use geometry::{Aabb, Size, intersects};
pub use level::Level;
pub use state::{EntitySizes, GameEvent, GamePhase, GameState, Outcome};
pub use tick::{HeldIntents, TickInput, tick};
