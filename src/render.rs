//! Rendering boundary
//!
//! The simulation never draws. After each tick a presentation layer takes a
//! `RenderSnapshot`: plain copies of every box it needs, plus HUD values.
//! Sprite choice is a pure function of role and facing, resolved here rather
//! than stored on entities.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Direction, EnemyTank, GamePhase, GameState, Owner, PlayerTank, Projectile, Size};

/// Which sprite family an entity draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    PlayerTank,
    EnemyTank,
    PlayerShell,
    EnemyShell,
}

/// Handle a renderer resolves to an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteKey {
    pub kind: SpriteKind,
    pub direction: Direction,
}

impl SpriteKey {
    /// Clockwise rotation applied to the upward-facing base image
    pub fn rotation_degrees(&self) -> u16 {
        match self.direction {
            Direction::Up => 0,
            Direction::Right => 90,
            Direction::Down => 180,
            Direction::Left => 270,
        }
    }
}

/// Flat RGB used when no sprite could be loaded
pub fn fallback_color(kind: SpriteKind) -> [u8; 3] {
    match kind {
        SpriteKind::PlayerTank => [0, 255, 0],
        SpriteKind::EnemyTank => [255, 0, 0],
        SpriteKind::PlayerShell => [255, 255, 0],
        SpriteKind::EnemyShell => [255, 0, 255],
    }
}

/// One box to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    /// Top-left corner
    pub pos: IVec2,
    pub size: Size,
    pub sprite: SpriteKey,
}

/// Anything the renderer can draw
pub trait Drawable {
    fn view(&self) -> EntityView;
}

impl Drawable for PlayerTank {
    fn view(&self) -> EntityView {
        EntityView {
            id: 0,
            pos: self.tank.pos,
            size: self.tank.size,
            sprite: SpriteKey {
                kind: SpriteKind::PlayerTank,
                direction: self.tank.direction,
            },
        }
    }
}

impl Drawable for EnemyTank {
    fn view(&self) -> EntityView {
        EntityView {
            id: self.id,
            pos: self.tank.pos,
            size: self.tank.size,
            sprite: SpriteKey {
                kind: SpriteKind::EnemyTank,
                direction: self.tank.direction,
            },
        }
    }
}

impl Drawable for Projectile {
    fn view(&self) -> EntityView {
        let kind = match self.owner {
            Owner::Player => SpriteKind::PlayerShell,
            Owner::Enemy => SpriteKind::EnemyShell,
        };
        EntityView {
            id: self.id,
            pos: self.pos,
            size: self.size,
            sprite: SpriteKey {
                kind,
                direction: self.direction,
            },
        }
    }
}

/// Read-only picture of one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub level: u8,
    pub tick: u64,
    pub phase: GamePhase,
    pub health: u32,
    pub player: EntityView,
    pub enemies: Vec<EntityView>,
    pub projectiles: Vec<EntityView>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            level: state.level.index(),
            tick: state.time_ticks,
            phase: state.phase,
            health: state.player.health,
            player: state.player.view(),
            enemies: state.enemies.iter().map(Drawable::view).collect(),
            projectiles: state
                .player_projectiles
                .iter()
                .chain(&state.enemy_projectiles)
                .map(Drawable::view)
                .collect(),
        }
    }

    /// HUD text, top to bottom
    pub fn hud_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Health: {}", self.health), format!("Level: {}", self.level)];
        match self.phase {
            GamePhase::Playing => {}
            GamePhase::GameOver => lines.push("Game Over!".to_string()),
            GamePhase::Cleared => lines.push("You won!".to_string()),
        }
        lines
    }
}

/// A presentation layer that consumes snapshots
pub trait Renderer {
    fn draw(&mut self, snapshot: &RenderSnapshot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EntitySizes, Level};

    #[test]
    fn test_capture_copies_state() {
        let state = GameState::new(Level::FIRST, 3, EntitySizes::default());
        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.health, 2);
        assert_eq!(snap.player.pos, IVec2::new(400, 550));
        assert_eq!(snap.player.sprite.kind, SpriteKind::PlayerTank);
        assert_eq!(snap.enemies.len(), 1);
        assert_eq!(snap.enemies[0].sprite.direction, Direction::Down);
        assert!(snap.projectiles.is_empty());
    }

    #[test]
    fn test_projectile_sprites_follow_owner() {
        let mut state = GameState::new(Level::FIRST, 3, EntitySizes::default());
        let shell = state.enemies[0].tank.fire(50, Size::square(15), Owner::Enemy);
        state.enemy_projectiles.push(shell);
        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.projectiles.len(), 1);
        assert_eq!(snap.projectiles[0].sprite.kind, SpriteKind::EnemyShell);
        assert_eq!(fallback_color(snap.projectiles[0].sprite.kind), [255, 0, 255]);
    }

    #[test]
    fn test_rotation_mapping() {
        let key = |direction| SpriteKey {
            kind: SpriteKind::EnemyTank,
            direction,
        };
        assert_eq!(key(Direction::Up).rotation_degrees(), 0);
        assert_eq!(key(Direction::Down).rotation_degrees(), 180);
        assert_eq!(key(Direction::Left).rotation_degrees(), 270);
        assert_eq!(key(Direction::Right).rotation_degrees(), 90);
    }

    #[test]
    fn test_hud_lines() {
        let mut state = GameState::new(Level::new(2).unwrap(), 3, EntitySizes::default());
        state.phase = GamePhase::GameOver;
        let lines = RenderSnapshot::capture(&state).hud_lines();
        assert_eq!(lines, vec!["Health: 5", "Level: 2", "Game Over!"]);
    }
}
