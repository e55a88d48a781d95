//! Game settings
//!
//! Loaded from a JSON file by the native driver; every field has a default,
//! so a partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::{EntitySizes, Size};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for the first level; restarts derive from it
    pub seed: u64,
    /// Fixed tick length in milliseconds
    pub tick_ms: u32,
    /// Maximum ticks run per frame when catching up
    pub max_substeps: u32,

    // === Assets ===
    /// Tank sprite size, `None` when no sprite is loaded
    pub tank_size: Option<(i32, i32)>,
    /// Projectile sprite size, `None` when no sprite is loaded
    pub projectile_size: Option<(i32, i32)>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x7a4e_2d1f,
            tick_ms: DEFAULT_TICK_MS,
            max_substeps: MAX_SUBSTEPS,

            tank_size: None,
            projectile_size: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            return Err(Error::InvalidSettings("tick_ms must be positive".into()));
        }
        if self.max_substeps == 0 {
            return Err(Error::InvalidSettings("max_substeps must be positive".into()));
        }
        for (name, size) in [("tank_size", self.tank_size), ("projectile_size", self.projectile_size)] {
            if let Some((w, h)) = size {
                if w <= 0 || h <= 0 {
                    return Err(Error::InvalidSettings(format!("{name} must be positive, got {w}x{h}")));
                }
                if w > ARENA_WIDTH || h > ARENA_HEIGHT {
                    return Err(Error::InvalidSettings(format!("{name} {w}x{h} does not fit the arena")));
                }
            }
        }
        if !(0.0..=1.0).contains(&self.master_volume) || !(0.0..=1.0).contains(&self.sfx_volume) {
            return Err(Error::InvalidSettings("volumes must be within 0.0..=1.0".into()));
        }
        Ok(())
    }

    /// Collision sizes: asset sizes when given, geometric defaults otherwise
    pub fn entity_sizes(&self) -> EntitySizes {
        let defaults = EntitySizes::default();
        EntitySizes {
            tank: self.tank_size.map_or(defaults.tank, |(w, h)| Size::new(w, h)),
            projectile: self.projectile_size.map_or(defaults.projectile, |(w, h)| Size::new(w, h)),
        }
    }

    /// Effective hit-cue volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}
