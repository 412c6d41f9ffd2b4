//! Slingshot entry point
//!
//! Runs a scripted headless session over the built-in physics and draw-list
//! backends: a handful of shots across the levels, logging score and level.
//!
//! Usage: `slingshot [tuning.json] [levels.json]`

use std::path::PathBuf;

use anyhow::Context;
use glam::Vec2;

use slingshot::consts::*;
use slingshot::physics::HeadlessWorld;
use slingshot::platform::{AbilityKey, InputEvent, MouseButton};
use slingshot::renderer::DrawList;
use slingshot::sim::{Game, LevelSet};
use slingshot::tuning::Tuning;

/// Frames simulated after each shot
const FRAMES_PER_SHOT: u32 = 240;

/// Scripted shots: ability key, then drag offset from the anchor
const SHOTS: &[(AbilityKey, Vec2)] = &[
    (AbilityKey::None, Vec2::new(-150.0, -40.0)),
    (AbilityKey::Split, Vec2::new(-140.0, -60.0)),
    (AbilityKey::SpeedVariant, Vec2::new(-150.0, -20.0)),
    (AbilityKey::None, Vec2::new(-120.0, -90.0)),
    (AbilityKey::Split, Vec2::new(-150.0, -50.0)),
    (AbilityKey::None, Vec2::new(-150.0, -30.0)),
];

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Slingshot (headless) starting...");

    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let tuning = match args.next() {
        Some(path) => Tuning::load_file(&path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let levels = match args.next() {
        Some(path) => LevelSet::load_file(&path)
            .with_context(|| format!("loading levels from {}", path.display()))?,
        None => LevelSet::builtin(),
    };

    let mut game = Game::new(HeadlessWorld::default(), DrawList::new(), tuning, levels);
    let anchor = Vec2::new(LAUNCH_X, LAUNCH_Y);
    let frame_dt = SIM_DT;
    let mut accumulator = 0.0;

    for (shot, &(key, offset)) in SHOTS.iter().enumerate() {
        game.handle_input(InputEvent::Key(key));
        game.handle_input(InputEvent::Press {
            button: MouseButton::Left,
            pos: anchor,
        });
        game.handle_input(InputEvent::Drag {
            button: MouseButton::Left,
            pos: anchor + offset,
        });
        let release = game.handle_input(InputEvent::Release {
            button: MouseButton::Left,
            pos: anchor + offset,
        });
        log::info!("Shot {}: {:?}", shot + 1, release);

        for frame in 0..FRAMES_PER_SHOT {
            // Fire the ability a third of a second into the flight
            if frame == 20 {
                game.handle_input(InputEvent::Press {
                    button: MouseButton::Left,
                    pos: Vec2::new(WORLD_WIDTH - 50.0, WORLD_HEIGHT - 50.0),
                });
            }

            accumulator += frame_dt;
            let mut substeps = 0;
            while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let report = game.tick(SIM_DT);
                if report.points > 0 {
                    log::info!("+{} (score {})", report.points, game.score());
                }
                accumulator -= SIM_DT;
                substeps += 1;
            }
            game.draw();
        }
    }

    log::info!(
        "Session over: score {}, level {}/{}, {} objects left",
        game.score(),
        game.level(),
        game.levels().len(),
        game.state().registry.len()
    );
    Ok(())
}
