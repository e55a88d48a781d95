//! Tanks and projectiles
//!
//! A `Tank` is the shared movement/firing body. The player and enemy roles
//! wrap it with their own data (health, AI state) and expose it through the
//! `TankBody` capability trait.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::ai::AiState;
use super::geometry::{Aabb, Size};
use super::tick::HeldIntents;
use crate::clamp_to_arena;
use crate::consts::*;

/// Cardinal facing of a tank or projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit step in screen coordinates (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// Shared tank body: position, facing, speed and collision size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tank {
    /// Top-left corner
    pub pos: IVec2,
    pub direction: Direction,
    /// Units moved per step
    pub speed: i32,
    pub size: Size,
}

impl Tank {
    pub fn new(pos: IVec2, direction: Direction, speed: i32, size: Size) -> Self {
        let mut tank = Self {
            pos,
            direction,
            speed,
            size,
        };
        tank.clamp_to_arena();
        tank
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Face `direction` and move one speed-step that way (unclamped)
    pub fn step(&mut self, direction: Direction) {
        self.direction = direction;
        self.pos += direction.delta() * self.speed;
    }

    pub fn clamp_to_arena(&mut self) {
        self.pos = clamp_to_arena(self.pos, self.size);
    }

    /// Apply held movement intents for one tick.
    ///
    /// The vertical axis is resolved first, then the horizontal one, so
    /// holding UP+LEFT moves diagonally but leaves the tank facing LEFT.
    pub fn apply_move_intent(&mut self, held: HeldIntents) {
        if held.contains(Direction::Up) {
            self.step(Direction::Up);
        } else if held.contains(Direction::Down) {
            self.step(Direction::Down);
        }

        if held.contains(Direction::Left) {
            self.step(Direction::Left);
        } else if held.contains(Direction::Right) {
            self.step(Direction::Right);
        }

        self.clamp_to_arena();
    }

    /// Spawn a projectile centered on the facing edge.
    ///
    /// Offsets use integer division, so odd sizes truncate toward zero.
    pub fn fire(&self, id: u32, size: Size, owner: Owner) -> Projectile {
        let (pos, body) = (self.pos, self.size);
        let pos = match self.direction {
            Direction::Up => IVec2::new(pos.x + (body.w - size.w) / 2, pos.y - size.h / 2),
            Direction::Down => IVec2::new(pos.x + (body.w - size.w) / 2, pos.y + body.h - size.h / 2),
            Direction::Left => IVec2::new(pos.x - size.w / 2, pos.y + (body.h - size.h) / 2),
            Direction::Right => IVec2::new(pos.x + body.w - size.w / 2, pos.y + (body.h - size.h) / 2),
        };
        Projectile::new(id, pos, self.direction, size, owner)
    }
}

/// Capability set shared by both tank roles
pub trait TankBody {
    fn tank(&self) -> &Tank;
    fn tank_mut(&mut self) -> &mut Tank;
    /// Side credited with projectiles this tank fires
    fn owner(&self) -> Owner;

    fn bounds(&self) -> Aabb {
        self.tank().bounds()
    }

    fn fire(&self, id: u32, size: Size) -> Projectile {
        self.tank().fire(id, size, self.owner())
    }
}

/// The player's tank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTank {
    pub tank: Tank,
    pub health: u32,
}

impl PlayerTank {
    /// Player at bottom-center facing up
    pub fn spawn(health: u32, size: Size) -> Self {
        let pos = IVec2::new(ARENA_WIDTH / 2, ARENA_HEIGHT - PLAYER_SPAWN_BOTTOM_OFFSET);
        Self {
            tank: Tank::new(pos, Direction::Up, PLAYER_SPEED, size),
            health,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Lose one health point. Returns true if this hit was fatal.
    pub fn damage(&mut self) -> bool {
        if self.health == 0 {
            return false;
        }
        self.health -= 1;
        self.health == 0
    }

    pub fn heal(&mut self) {
        self.health = self.health.saturating_add(1);
    }
}

impl TankBody for PlayerTank {
    fn tank(&self) -> &Tank {
        &self.tank
    }

    fn tank_mut(&mut self) -> &mut Tank {
        &mut self.tank
    }

    fn owner(&self) -> Owner {
        Owner::Player
    }
}

/// An AI-driven enemy tank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTank {
    pub id: u32,
    pub tank: Tank,
    pub ai: AiState,
}

impl EnemyTank {
    /// Enemy on the top edge at `x`, facing down
    pub fn spawn(id: u32, x: i32, size: Size) -> Self {
        let tank = Tank::new(IVec2::new(x, 0), Direction::Down, ENEMY_SPEED, size);
        let ai = AiState::new(tank.pos);
        Self { id, tank, ai }
    }
}

impl TankBody for EnemyTank {
    fn tank(&self) -> &Tank {
        &self.tank
    }

    fn tank_mut(&mut self) -> &mut Tank {
        &mut self.tank
    }

    fn owner(&self) -> Owner {
        Owner::Enemy
    }
}

/// A fired shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: IVec2,
    /// Fixed at the instant of firing
    pub direction: Direction,
    pub speed: i32,
    pub size: Size,
    pub owner: Owner,
    pub active: bool,
}

impl Projectile {
    pub fn new(id: u32, pos: IVec2, direction: Direction, size: Size, owner: Owner) -> Self {
        Self {
            id,
            pos,
            direction,
            speed: PROJECTILE_SPEED,
            size,
            owner,
            active: true,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Move one step; deactivate once past the arena edge along the travel axis
    pub fn advance(&mut self) {
        if !self.active {
            return;
        }
        self.pos += self.direction.delta() * self.speed;
        let out = match self.direction {
            Direction::Up => self.pos.y < 0,
            Direction::Down => self.pos.y > ARENA_HEIGHT,
            Direction::Left => self.pos.x < 0,
            Direction::Right => self.pos.x > ARENA_WIDTH,
        };
        if out {
            self.active = false;
        }
    }

    /// Collision test against a tank box; inactive projectiles never hit
    pub fn hits(&self, target: &Aabb) -> bool {
        self.active && self.bounds().intersects(target)
    }
}
