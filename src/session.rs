//! Session driver
//!
//! Owns one running level and everything around it: the fixed-timestep
//! accumulator, the shared input state, the audio manager and the
//! level-selection loop after a level ends.

use crate::audio::AudioManager;
use crate::error::Result;
use crate::input::SharedInput;
use crate::render::RenderSnapshot;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Level, Outcome, tick};

/// Supplies a level index at session start and after each finished level
pub trait LevelSelector {
    /// `previous` is `None` at session start. Returning `None` ends the session.
    fn select_level(&mut self, previous: Option<Outcome>) -> Option<u8>;
}

/// Game session holding all state
pub struct Session {
    settings: Settings,
    state: GameState,
    input: SharedInput,
    audio: AudioManager,
    accumulator_ms: u32,
    restarts: u64,
}

impl Session {
    /// Start `level_index`; out-of-range levels are rejected
    pub fn new(settings: Settings, level_index: u8, mut audio: AudioManager) -> Result<Self> {
        settings.validate()?;
        let level = Level::new(level_index)?;
        audio.set_volume(settings.effective_volume());
        audio.set_muted(settings.muted);
        let state = GameState::new(level, settings.seed, settings.entity_sizes());
        Ok(Self {
            settings,
            state,
            input: SharedInput::new(),
            audio,
            accumulator_ms: 0,
            restarts: 0,
        })
    }

    /// Start a session with the selector's first choice
    pub fn start(
        settings: Settings,
        selector: &mut dyn LevelSelector,
        audio: AudioManager,
    ) -> Result<Option<Self>> {
        match selector.select_level(None) {
            Some(index) => Self::new(settings, index, audio).map(Some),
            None => Ok(None),
        }
    }

    /// Handle for the input side (may be moved to another thread)
    pub fn input(&self) -> SharedInput {
        self.input.clone()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    /// Run exactly one tick. Returns the outcome if the level ended on it.
    pub fn step(&mut self) -> Option<Outcome> {
        if self.state.is_finished() {
            return None;
        }
        let input = self.input.snapshot();
        tick(&mut self.state, &input, self.settings.tick_ms);

        let mut finished = None;
        for event in self.state.drain_events() {
            match event {
                GameEvent::EnemyDestroyed { .. } => self.audio.play_hit_cue(),
                GameEvent::Finished(outcome) => finished = Some(outcome),
                GameEvent::EnemySpawned { .. } | GameEvent::PlayerHit { .. } => {}
            }
        }
        finished
    }

    /// Run simulation ticks for `elapsed_ms` of wall-clock time
    pub fn advance(&mut self, elapsed_ms: u32) -> Option<Outcome> {
        let tick_ms = self.settings.tick_ms;
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);

        let mut substeps = 0;
        while self.accumulator_ms >= tick_ms && substeps < self.settings.max_substeps {
            self.accumulator_ms -= tick_ms;
            substeps += 1;
            if let Some(outcome) = self.step() {
                self.accumulator_ms = 0;
                return Some(outcome);
            }
        }

        // Drop time we could not catch up on
        if substeps == self.settings.max_substeps {
            self.accumulator_ms = self.accumulator_ms.min(tick_ms);
        }
        None
    }

    /// Reinitialize at `level_index` with a fresh seed derived from the settings
    pub fn restart(&mut self, level_index: u8) -> Result<()> {
        let level = Level::new(level_index)?;
        self.restarts += 1;
        let seed = self.settings.seed.wrapping_add(self.restarts);
        self.state = GameState::new(level, seed, self.settings.entity_sizes());
        self.accumulator_ms = 0;
        self.input.lock().cancel_fire_request();
        Ok(())
    }

    /// Ask the selector what to do after a finished level.
    ///
    /// Returns `Ok(true)` if a new level started, `Ok(false)` if the session ends.
    pub fn resolve(&mut self, selector: &mut dyn LevelSelector) -> Result<bool> {
        let Some(outcome) = self.state.outcome() else {
            return Ok(true);
        };
        match selector.select_level(Some(outcome)) {
            Some(index) => {
                self.restart(index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
