//! Tank Arena entry point
//!
//! Runs a headless session with a simple autopilot standing in for the
//! keyboard, then prints the final snapshot as JSON.
//!
//! Usage: `tank-arena [LEVEL] [SETTINGS.json]`

use tank_arena::audio::{AudioManager, LogAudio};
use tank_arena::input::{Key, SharedInput};
use tank_arena::render::RenderSnapshot;
use tank_arena::session::LevelSelector;
use tank_arena::sim::{Direction, Outcome};
use tank_arena::{Result, Session, Settings};

/// Frame length fed to the fixed-timestep accumulator (~60 Hz)
const FRAME_MS: u32 = 16;
/// Give up on a level after this many frames
const MAX_FRAMES: u32 = 60 * 120;

/// Advance one level after a clear, stop after a loss or the last level
struct Progression {
    first: u8,
    current: u8,
}

impl LevelSelector for Progression {
    fn select_level(&mut self, previous: Option<Outcome>) -> Option<u8> {
        match previous {
            None => Some(self.first),
            Some(Outcome::Cleared) if self.current < 3 => {
                self.current += 1;
                Some(self.current)
            }
            Some(_) => None,
        }
    }
}

/// Line up under the nearest enemy, face up and shoot
fn autopilot(snapshot: &RenderSnapshot, input: &SharedInput, frame: u32) {
    let player = snapshot.player;
    let Some(target) = snapshot
        .enemies
        .iter()
        .min_by_key(|e| (e.pos.x - player.pos.x).abs() + (e.pos.y - player.pos.y).abs())
    else {
        return;
    };

    let mut state = input.lock();
    for key in [Key::W, Key::A, Key::D] {
        state.key_up(key);
    }
    let dx = target.pos.x - player.pos.x;
    if dx > 4 {
        state.key_down(Key::D);
    } else if dx < -4 {
        state.key_down(Key::A);
    } else if player.sprite.direction != Direction::Up {
        state.key_down(Key::W);
    } else if frame % 10 == 0 {
        state.key_down(Key::Space);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let level = match args.next() {
        Some(arg) => arg.parse::<u8>().unwrap_or(0),
        None => 1,
    };
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut selector = Progression {
        first: level,
        current: level,
    };
    let audio = AudioManager::new(Box::new(LogAudio::default()));
    let Some(mut session) = Session::start(settings, &mut selector, audio)? else {
        return Ok(());
    };
    let input = session.input();

    loop {
        let mut outcome = None;
        for frame in 0..MAX_FRAMES {
            autopilot(&session.snapshot(), &input, frame);
            outcome = session.advance(FRAME_MS);
            if outcome.is_some() {
                break;
            }
        }

        let snapshot = session.snapshot();
        log::info!("{}", snapshot.hud_lines().join(" | "));
        if outcome.is_none() {
            log::info!("Level {} still running after {} frames, stopping", snapshot.level, MAX_FRAMES);
            break;
        }
        if !session.resolve(&mut selector)? {
            break;
        }
    }

    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Tank Arena (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
