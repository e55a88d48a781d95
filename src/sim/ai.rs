//! Enemy AI strategy engine
//!
//! Each enemy runs its own small state machine. A strategy timer re-rolls
//! the current mode every `STRATEGY_CHANGE_TICKS`; AMBUSH and RETREAT can
//! also force an early re-roll. Movement is integer and one axis per tick.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Direction, EnemyTank, Tank};
use crate::consts::*;

/// Enemy movement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Wander, occasionally turning
    Random,
    /// Chase the player along the dominant axis
    SeekPlayer,
    /// Loop through the fixed waypoints
    Patrol,
    /// Hold still, then re-roll
    Ambush,
    /// Head for a sampled point, then re-roll
    Retreat,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Random,
        Strategy::SeekPlayer,
        Strategy::Patrol,
        Strategy::Ambush,
        Strategy::Retreat,
    ];
}

/// Per-enemy AI state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiState {
    pub strategy: Strategy,
    /// Ticks since the last timed re-roll
    pub strategy_timer: u32,
    /// Next waypoint in `PATROL_WAYPOINTS`
    pub patrol_index: usize,
    /// Ticks spent in the current ambush
    pub ambush_ticks: u32,
    pub retreat_target: IVec2,
    /// Ticks since the last shot
    pub fire_timer: u32,
}

impl AiState {
    /// Fresh state; the retreat target starts at the spawn point
    pub fn new(spawn: IVec2) -> Self {
        Self {
            strategy: Strategy::Random,
            strategy_timer: 0,
            patrol_index: 0,
            ambush_ticks: 0,
            retreat_target: spawn,
            fire_timer: 0,
        }
    }

    /// Enter `strategy`, sampling a retreat point when needed
    pub fn set_strategy<R: Rng + ?Sized>(&mut self, strategy: Strategy, rng: &mut R) {
        log::trace!("strategy {:?} -> {:?}", self.strategy, strategy);
        self.strategy = strategy;
        match strategy {
            Strategy::Ambush => self.ambush_ticks = 0,
            Strategy::Retreat => {
                self.retreat_target = IVec2::new(
                    rng.random_range(RETREAT_MARGIN..ARENA_WIDTH - RETREAT_MARGIN),
                    rng.random_range(RETREAT_MARGIN..ARENA_HEIGHT - RETREAT_MARGIN),
                );
            }
            _ => {}
        }
    }

    /// Uniform draw over all strategies (self-transition allowed)
    pub fn reroll<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let next = Strategy::ALL[rng.random_range(0..Strategy::ALL.len())];
        self.set_strategy(next, rng);
    }

    /// Advance the fire cooldown; true when a shot is due
    pub fn tick_fire(&mut self) -> bool {
        self.fire_timer += 1;
        if self.fire_timer >= ENEMY_FIRE_TICKS {
            self.fire_timer = 0;
            return true;
        }
        false
    }
}

/// Advance one enemy's AI by one tick and move it.
///
/// `player_pos` is the player's top-left corner at the start of this step.
pub fn step<R: Rng + ?Sized>(enemy: &mut EnemyTank, player_pos: IVec2, rng: &mut R) {
    let EnemyTank { tank, ai, .. } = enemy;

    ai.strategy_timer += 1;
    if ai.strategy_timer >= STRATEGY_CHANGE_TICKS {
        ai.reroll(rng);
        ai.strategy_timer = 0;
    }

    match ai.strategy {
        Strategy::Random => {
            if rng.random_ratio(RANDOM_TURN_PERCENT, 100) {
                tank.direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
            }
            let facing = tank.direction;
            tank.step(facing);
        }
        Strategy::SeekPlayer => seek(tank, player_pos, rng),
        Strategy::Patrol => {
            let (x, y) = PATROL_WAYPOINTS[ai.patrol_index];
            if approach(tank, IVec2::new(x, y)) {
                ai.patrol_index = (ai.patrol_index + 1) % PATROL_WAYPOINTS.len();
            }
        }
        Strategy::Ambush => {
            ai.ambush_ticks += 1;
            if ai.ambush_ticks >= AMBUSH_TICKS {
                ai.reroll(rng);
            }
        }
        Strategy::Retreat => {
            if approach(tank, ai.retreat_target) {
                ai.reroll(rng);
            }
        }
    }

    tank.clamp_to_arena();
}

/// Chase `target` along the dominant axis; horizontal wins ties.
///
/// Inside `SEEK_JINK_DISTANCE` a coin flip moves along the other axis instead.
fn seek<R: Rng + ?Sized>(tank: &mut Tank, target: IVec2, rng: &mut R) {
    let d = target - tank.pos;
    let distance = ((d.x as f64).powi(2) + (d.y as f64).powi(2)).sqrt();
    let horizontal = d.x.abs() >= d.y.abs();
    let jink = distance < SEEK_JINK_DISTANCE && rng.random_bool(0.5);

    let dir = if horizontal != jink {
        if d.x > 0 { Direction::Right } else { Direction::Left }
    } else if d.y > 0 {
        Direction::Down
    } else {
        Direction::Up
    };
    tank.step(dir);
}

/// One speed-step toward `target`, x fully before y.
///
/// Returns true only on an exact match after the step. Steps that do not
/// divide the remaining distance overshoot and oscillate without arriving.
fn approach(tank: &mut Tank, target: IVec2) -> bool {
    let pos = tank.pos;
    if pos.x < target.x {
        tank.step(Direction::Right);
    } else if pos.x > target.x {
        tank.step(Direction::Left);
    } else if pos.y < target.y {
        tank.step(Direction::Down);
    } else if pos.y > target.y {
        tank.step(Direction::Up);
    }
    tank.pos == target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Size;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn enemy_at(x: i32, y: i32, strategy: Strategy) -> EnemyTank {
        let mut enemy = EnemyTank::spawn(1, 0, Size::square(TANK_SIZE));
        enemy.tank.pos = IVec2::new(x, y);
        enemy.ai.strategy = strategy;
        enemy
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_seek_far_moves_along_dominant_axis() {
        let mut rng = rng();
        let mut enemy = enemy_at(100, 0, Strategy::SeekPlayer);
        step(&mut enemy, IVec2::new(400, 550), &mut rng);
        assert_eq!(enemy.tank.pos, IVec2::new(100, 3));
        assert_eq!(enemy.tank.direction, Direction::Down);

        let mut enemy = enemy_at(700, 500, Strategy::SeekPlayer);
        step(&mut enemy, IVec2::new(100, 450), &mut rng);
        assert_eq!(enemy.tank.pos, IVec2::new(697, 500));
        assert_eq!(enemy.tank.direction, Direction::Left);
    }

    #[test]
    fn test_seek_tie_prefers_horizontal() {
        let mut rng = rng();
        let mut enemy = enemy_at(100, 100, Strategy::SeekPlayer);
        step(&mut enemy, IVec2::new(300, 300), &mut rng);
        assert_eq!(enemy.tank.pos, IVec2::new(103, 100));
        assert_eq!(enemy.tank.direction, Direction::Right);
    }

    #[test]
    fn test_seek_close_moves_one_axis_toward_player() {
        let mut rng = rng();
        for _ in 0..50 {
            let mut enemy = enemy_at(300, 300, Strategy::SeekPlayer);
            step(&mut enemy, IVec2::new(400, 340), &mut rng);
            let moved = enemy.tank.pos;
            assert!(moved == IVec2::new(303, 300) || moved == IVec2::new(300, 303), "{moved:?}");
        }
    }

    #[test]
    fn test_seek_close_eventually_jinks() {
        let mut rng = rng();
        let jinked = (0..64).any(|_| {
            let mut enemy = enemy_at(300, 300, Strategy::SeekPlayer);
            step(&mut enemy, IVec2::new(400, 340), &mut rng);
            enemy.tank.direction == Direction::Down
        });
        assert!(jinked);
    }

    #[test]
    fn test_patrol_x_before_y_and_advances_on_exact_arrival() {
        let mut rng = rng();
        let mut enemy = enemy_at(194, 144, Strategy::Patrol);
        step(&mut enemy, IVec2::ZERO, &mut rng);
        assert_eq!(enemy.tank.pos, IVec2::new(197, 144));
        step(&mut enemy, IVec2::ZERO, &mut rng);
        assert_eq!(enemy.tank.pos, IVec2::new(200, 144));
        assert_eq!(enemy.ai.patrol_index, 0);
        step(&mut enemy, IVec2::ZERO, &mut rng);
        step(&mut enemy, IVec2::ZERO, &mut rng);
        assert_eq!(enemy.tank.pos, IVec2::new(200, 150));
        assert_eq!(enemy.ai.patrol_index, 1);
        assert_eq!(enemy.tank.direction, Direction::Down);
    }

    #[test]
    fn test_patrol_wraps_waypoints() {
        let mut rng = rng();
        let mut enemy = enemy_at(200, 453, Strategy::Patrol);
        enemy.ai.patrol_index = 3;
        step(&mut enemy, IVec2::ZERO, &mut rng);
        assert_eq!(enemy.ai.patrol_index, 0);
    }

    #[test]
    fn test_patrol_overshoot_never_advances() {
        let mut rng = rng();
        // 200 - 0 is not a multiple of 3
        let mut enemy = enemy_at(0, 150, Strategy::Patrol);
        for _ in 0..(STRATEGY_CHANGE_TICKS - 1) {
            step(&mut enemy, IVec2::ZERO, &mut rng);
            assert_eq!(enemy.ai.patrol_index, 0);
        }
        let x = enemy.tank.pos.x;
        assert!((198..=201).contains(&x), "x = {x}");
        assert_eq!(enemy.tank.pos.y, 150);
    }

    #[test]
    fn test_ambush_holds_then_rerolls() {
        let mut rng = rng();
        let mut enemy = enemy_at(300, 300, Strategy::Ambush);
        for _ in 0..(AMBUSH_TICKS - 1) {
            step(&mut enemy, IVec2::ZERO, &mut rng);
            assert_eq!(enemy.tank.pos, IVec2::new(300, 300));
            assert_eq!(enemy.ai.strategy, Strategy::Ambush);
        }
        let mut expected = enemy.ai.clone();
        expected.reroll(&mut rng.clone());
        step(&mut enemy, IVec2::ZERO, &mut rng);
        assert_eq!(enemy.tank.pos, IVec2::new(300, 300));
        assert_eq!(enemy.ai.strategy, expected.strategy);
        // Forced re-roll does not touch the timed re-roll counter
        assert_eq!(enemy.ai.strategy_timer, AMBUSH_TICKS);
    }

    #[test]
    fn test_retreat_target_within_margin() {
        let mut rng = rng();
        let mut ai = AiState::new(IVec2::ZERO);
        for _ in 0..200 {
            ai.set_strategy(Strategy::Retreat, &mut rng);
            let t = ai.retreat_target;
            assert!(t.x >= RETREAT_MARGIN && t.x < ARENA_WIDTH - RETREAT_MARGIN);
            assert!(t.y >= RETREAT_MARGIN && t.y < ARENA_HEIGHT - RETREAT_MARGIN);
        }
    }

    #[test]
    fn test_retreat_arrival_rerolls() {
        let mut rng = rng();
        let mut enemy = enemy_at(297, 300, Strategy::Retreat);
        enemy.ai.retreat_target = IVec2::new(300, 300);
        let mut expected = enemy.ai.clone();
        expected.reroll(&mut rng.clone());
        step(&mut enemy, IVec2::ZERO, &mut rng);
        assert_eq!(enemy.tank.pos, IVec2::new(300, 300));
        assert_eq!(enemy.ai.strategy, expected.strategy);
        assert_eq!(enemy.ai.retreat_target, expected.retreat_target);
    }

    #[test]
    fn test_retreat_overshoot_keeps_retreating() {
        let mut rng = rng();
        let mut enemy = enemy_at(100, 100, Strategy::Retreat);
        enemy.ai.retreat_target = IVec2::new(110, 100);
        for _ in 0..50 {
            step(&mut enemy, IVec2::ZERO, &mut rng);
            assert_eq!(enemy.ai.strategy, Strategy::Retreat);
        }
    }

    #[test]
    fn test_timed_reroll_resets_timer() {
        let mut rng = rng();
        let mut enemy = enemy_at(300, 300, Strategy::Random);
        enemy.ai.strategy_timer = STRATEGY_CHANGE_TICKS - 1;
        step(&mut enemy, IVec2::ZERO, &mut rng);
        assert_eq!(enemy.ai.strategy_timer, 0);
    }

    #[test]
    fn test_reroll_reaches_every_strategy() {
        let mut rng = rng();
        let mut ai = AiState::new(IVec2::ZERO);
        let mut seen = Vec::new();
        for _ in 0..500 {
            ai.reroll(&mut rng);
            if !seen.contains(&ai.strategy) {
                seen.push(ai.strategy);
            }
        }
        assert_eq!(seen.len(), Strategy::ALL.len());
    }

    #[test]
    fn test_random_moves_in_facing() {
        let mut rng = rng();
        let mut enemy = enemy_at(300, 300, Strategy::Random);
        let before = enemy.tank.pos;
        step(&mut enemy, IVec2::ZERO, &mut rng);
        let delta = enemy.tank.pos - before;
        assert_eq!(delta, enemy.tank.direction.delta() * ENEMY_SPEED);
    }

    #[test]
    fn test_fire_cooldown() {
        let mut ai = AiState::new(IVec2::ZERO);
        let shots: Vec<bool> = (0..ENEMY_FIRE_TICKS * 2).map(|_| ai.tick_fire()).collect();
        assert_eq!(shots.iter().filter(|&&s| s).count(), 2);
        assert!(shots[ENEMY_FIRE_TICKS as usize - 1]);
    }
}
