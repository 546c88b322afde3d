//! Box Hop entry point
//!
//! Runs a headless session driven by the autopilot at 60 Hz and logs the
//! event stream. Usage: `box-hop [settings.json] [jumps]`.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use box_hop::Settings;
use box_hop::consts::FRAME_MS;
use box_hop::sim::{Autopilot, GameEvent, GamePhase, GameState, Ticker, apply_input};

/// Give up after five simulated minutes
const MAX_FRAMES: u32 = 60 * 60 * 5;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().map(PathBuf::from);
    let jumps: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(20);

    let settings = match settings_path {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = match GameState::new(settings, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    log::info!("Box Hop (headless) starting, seed {}", seed);

    // Stand-in for the renderer: counts drawn frames
    let drawn = Rc::new(Cell::new(0u64));
    let mut ticker = Ticker::new();
    {
        let drawn = drawn.clone();
        ticker.subscribe(move |state: &GameState, _dt| {
            drawn.set(drawn.get() + 1);
            let figure = state.figure_view();
            log::trace!(
                "figure at ({:.2}, {:.2}, {:.2}) squash {:.3}",
                figure.world_position.x,
                figure.world_position.y,
                figure.world_position.z,
                figure.trunk_scale_y
            );
        });
    }

    let mut pilot = Autopilot::new();
    for _ in 0..MAX_FRAMES {
        let input = pilot.next_input(&state, FRAME_MS);
        if apply_input(&mut state, &input) {
            ticker.request_frames();
        }
        ticker.frame(&mut state, FRAME_MS);

        for event in state.drain_events() {
            report(&event);
        }
        if state.phase == GamePhase::GameOver || state.landings >= jumps {
            break;
        }
    }

    println!(
        "{} landings, {} boxes, {} frames drawn, {:.1}s simulated{}",
        state.landings,
        state.chain.len(),
        drawn.get(),
        state.time_ms / 1000.0,
        if state.phase == GamePhase::GameOver {
            " - game over"
        } else {
            ""
        }
    );
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::ChargeStarted => log::debug!("Charging"),
        GameEvent::Launched { distance, direction } => {
            log::info!("Jump {:.2} toward {:?}", distance, direction)
        }
        GameEvent::Landed { platform } => log::info!("Landed on box {}", platform.0),
        GameEvent::Missed { x, z } => log::warn!("Fell at ({:.2}, {:.2})", x, z),
        GameEvent::PlatformAdded { platform } => log::debug!("Box {} added", platform.0),
    }
}
