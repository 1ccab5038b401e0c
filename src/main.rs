//! Bunny Jump headless runner
//!
//! Plays one autopiloted run against the reference collision detector and
//! prints the final snapshot as JSON.
//!
//! Usage: `bunny-jump [settings.json] [max_frames]`

#[cfg(not(target_arch = "wasm32"))]
use bunny_jump::{
    Settings,
    consts::FRAME_DT,
    sim::{
        GameEvent, GameState, InputSnapshot, RunStatus, SoundEffect, TickInput, detect_contacts,
        tick,
    },
};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Bunny Jump (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::from_json(&std::fs::read_to_string(&path)?)?,
        None => Settings::default(),
    };
    let max_frames = match args.next() {
        Some(n) => n.parse()?,
        None => DEFAULT_MAX_FRAMES,
    };

    let mut state = GameState::new(settings)?;
    let mut jumps = 0u32;

    while state.frame < max_frames {
        state.advance(FRAME_DT);
        let input = TickInput {
            controls: autopilot(&state),
            contact: detect_contacts(&state),
        };
        let status = tick(&mut state, &input)?;

        for event in state.drain_events() {
            match event {
                GameEvent::PlaySound(sound) => {
                    log::trace!("sound: {}", sound.as_str());
                    if sound == SoundEffect::Jump {
                        jumps += 1;
                    }
                }
                GameEvent::RunEnded { score } => log::info!("Run ended with {} carrots", score),
                other => log::trace!("{:?}", other),
            }
        }

        if status == RunStatus::GameOver {
            break;
        }
    }

    log::info!(
        "Finished after {} frames, {} jumps, score {}",
        state.frame,
        jumps,
        state.score
    );
    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}

/// Steer toward the nearest platform below while falling, otherwise toward
/// the closest carrot above
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &GameState) -> InputSnapshot {
    let player = &state.player.player;

    let target_x = if player.vel.y > 0.0 {
        state
            .platforms
            .platforms()
            .iter()
            .filter(|p| p.pos.y > player.pos.y)
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|p| p.pos.x)
    } else {
        state
            .carrots
            .active()
            .filter(|(_, c)| c.pos.y < player.pos.y)
            .max_by(|(_, a), (_, b)| a.pos.y.total_cmp(&b.pos.y))
            .map(|(_, c)| c.pos.x)
    };

    match target_x {
        Some(x) if x < player.pos.x - 10.0 => InputSnapshot {
            left: true,
            right: false,
        },
        Some(x) if x > player.pos.x + 10.0 => InputSnapshot {
            left: false,
            right: true,
        },
        _ => InputSnapshot::default(),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library only on wasm; the host page drives `tick`
}
