//! Level tables

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Player health at level start, indexed by level - 1
const INITIAL_HEALTH: [u32; 3] = [2, 5, 5];
/// Enemy spawn cadence in milliseconds, indexed by level - 1
const SPAWN_INTERVAL_MS: [u32; 3] = [10_000, 5_000, 1_000];

/// A validated level index in `1..=3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const FIRST: Level = Level(1);
    pub const COUNT: u8 = INITIAL_HEALTH.len() as u8;

    /// Reject anything outside `1..=COUNT`
    pub fn new(index: u8) -> Result<Self> {
        if (1..=Self::COUNT).contains(&index) {
            Ok(Self(index))
        } else {
            Err(Error::InvalidLevel(index))
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn initial_health(self) -> u32 {
        INITIAL_HEALTH[self.slot()]
    }

    pub fn spawn_interval_ms(self) -> u32 {
        SPAWN_INTERVAL_MS[self.slot()]
    }

    fn slot(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<u8> for Level {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self> {
        Self::new(index)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}
