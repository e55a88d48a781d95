//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use serde::{Deserialize, Serialize};

use super::ai;
use super::entity::{Direction, TankBody};
use super::state::{GameEvent, GamePhase, GameState, Outcome};

/// Set of movement directions currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldIntents {
    bits: u8,
}

impl HeldIntents {
    fn bit(direction: Direction) -> u8 {
        match direction {
            Direction::Up => 1,
            Direction::Down => 1 << 1,
            Direction::Left => 1 << 2,
            Direction::Right => 1 << 3,
        }
    }

    pub fn press(&mut self, direction: Direction) {
        self.bits |= Self::bit(direction);
    }

    pub fn release(&mut self, direction: Direction) {
        self.bits &= !Self::bit(direction);
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.bits & Self::bit(direction) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }
}

impl FromIterator<Direction> for HeldIntents {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut held = Self::default();
        for direction in iter {
            held.press(direction);
        }
        held
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Movement keys held at the start of the tick
    pub held: HeldIntents,
    /// One-shot fire request (edge-triggered)
    pub fire: bool,
}

/// Advance the game state by one fixed timestep of `tick_ms` milliseconds.
///
/// Finished games are frozen; the caller restarts with a new level.
pub fn tick(state: &mut GameState, input: &TickInput, tick_ms: u32) {
    if state.is_finished() {
        return;
    }

    state.time_ticks += 1;

    // Spawning
    state.spawn_timer_ms += tick_ms;
    if state.spawn_timer_ms >= state.level.spawn_interval_ms() {
        state.spawn_timer_ms = 0;
        state.spawn_enemy();
    }

    // Player fire, then movement
    if input.fire {
        let id = state.next_entity_id();
        let shell = state.player.fire(id, state.sizes.projectile);
        state.player_projectiles.push(shell);
    }
    state.player.tank.apply_move_intent(input.held);

    // Enemy AI and auto-fire
    let player_pos = state.player.tank.pos;
    let mut fired = Vec::new();
    for enemy in &mut state.enemies {
        ai::step(enemy, player_pos, &mut state.rng);
        if enemy.ai.tick_fire() {
            fired.push(enemy.fire(0, state.sizes.projectile));
        }
    }
    for mut shell in fired {
        shell.id = state.next_entity_id();
        state.enemy_projectiles.push(shell);
    }

    // Enemy shells against the player
    let player_box = state.player.bounds();
    for shell in &mut state.enemy_projectiles {
        shell.advance();
        if !shell.hits(&player_box) {
            continue;
        }
        shell.active = false;
        if !state.player.is_alive() {
            continue;
        }
        let fatal = state.player.damage();
        state.events.push(GameEvent::PlayerHit {
            health: state.player.health,
        });
        log::debug!("Player hit, health={}", state.player.health);
        if fatal {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::Finished(Outcome::GameOver));
            log::info!("Game over at tick {}", state.time_ticks);
        }
    }
    state.enemy_projectiles.retain(|p| p.active);

    if state.is_finished() {
        return;
    }

    // Player shells against enemies; each shell kills at most one enemy
    for shell in &mut state.player_projectiles {
        shell.advance();
        if !shell.active {
            continue;
        }
        let Some(index) = state.enemies.iter().position(|e| shell.hits(&e.bounds())) else {
            continue;
        };
        shell.active = false;
        let enemy = state.enemies.remove(index);
        state.player.heal();
        state.events.push(GameEvent::EnemyDestroyed { id: enemy.id });
        log::debug!("Enemy {} destroyed, health={}", enemy.id, state.player.health);
    }
    state.player_projectiles.retain(|p| p.active);

    if state.enemies.is_empty() {
        state.phase = GamePhase::Cleared;
        state.events.push(GameEvent::Finished(Outcome::Cleared));
        log::info!("Level {} cleared at tick {}", state.level.index(), state.time_ticks);
    }
}
