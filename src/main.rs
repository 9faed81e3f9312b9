//! Calendar Breakout entry point
//!
//! On wasm32 the page script drives [`calendar_breakout::web::WebGame`];
//! this binary is the native headless demo: a generated week view played by
//! the autopilot.
//!
//! Usage: `calendar-breakout [config.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use calendar_breakout::GameConfig;
    use calendar_breakout::sim::{Game, GameEvent, GamePhase, Rect, generate_calendar_layout};

    /// Display refresh the demo pretends to run at
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Calendar Breakout (native) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load(std::path::Path::new(&path))?,
        None => GameConfig::default(),
    };
    let seed = match args.next() {
        Some(seed) => seed.parse::<u64>()?,
        None => 2024,
    };

    let layout = generate_calendar_layout(seed, Rect::new(0.0, 0.0, 1200.0, 800.0));
    log::info!("Generated {} calendar events (seed {seed})", layout.bricks.len());

    let mut game = Game::new(config, layout);
    game.set_autopilot(true);
    game.start();

    let mut destroyed = 0;
    let mut stuck_ticks = 0;
    let mut frames = 0;
    while game.is_running() && frames < MAX_FRAMES {
        game.frame(FRAME_DT);
        frames += 1;

        for event in game.drain_events() {
            match event {
                GameEvent::BrickDestroyed { .. } => destroyed += 1,
                GameEvent::IterationLimit { .. } => stuck_ticks += 1,
                GameEvent::StageCleared { stage } => {
                    log::info!("Stage {stage} cleared after {:.1}s", frames as f32 * FRAME_DT);
                    // One stage is enough for a demo
                    game.stop();
                }
                _ => {}
            }
        }
    }

    let state = game.state();
    log::info!(
        "Finished after {:.1}s: stage {}, score {}, lives {}, {} bricks destroyed, \
         {} truncated ticks",
        frames as f32 * FRAME_DT,
        state.stage,
        state.score,
        state.lives,
        destroyed,
        stuck_ticks
    );
    if state.phase == GamePhase::Halted {
        return Err("simulation halted on a physics fault".into());
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
