//! Headless aim trainer driver.
//!
//! Runs a full training session without a window: a scripted player locks
//! the cursor, turns toward targets and fires at a fixed cadence. Flash cues
//! are drained from the presentation channel and logged, and the final
//! session snapshot is printed as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use bevy_ecs::prelude::*;
use clap::Parser;
use crossbeam_channel::Receiver;
use log::{debug, info, warn};

use aimtrainer::components::target::Target;
use aimtrainer::components::worldposition::WorldPosition;
use aimtrainer::events::flash::FlashCue;
use aimtrainer::game::{build_update_schedule, init_world, shutdown, tick};
use aimtrainer::resources::input::PlayerInput;
use aimtrainer::resources::playercamera::PlayerCamera;
use aimtrainer::resources::rng::GameRng;
use aimtrainer::resources::session::TrainingSession;
use aimtrainer::resources::trainingconfig::TrainingConfig;

/// Frames between HUD log lines.
const HUD_LOG_EVERY: u64 = 120;

/// Headless aim trainer
#[derive(Parser)]
#[command(version, about = "Runs a scripted aim training session and prints its statistics.")]
struct Cli {
    /// INI file with session, spawner and camera settings.
    #[arg(long, value_name = "PATH", default_value = "./training.ini")]
    config: PathBuf,

    /// Seed for every random draw. Omit for a random session.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated frames per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Stop after this many frames even if the session is still running.
    #[arg(long)]
    ticks: Option<u64>,

    /// Probability that the scripted player aims at a target before firing.
    #[arg(long, default_value_t = 0.7)]
    hit_rate: f64,

    /// Seconds between shots.
    #[arg(long, default_value_t = 0.4)]
    fire_interval: f64,

    /// Write the effective configuration to `--config` and exit.
    #[arg(long)]
    write_config: bool,

    /// Also write the JSON summary to this file.
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let mut config = TrainingConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{e}; using defaults");
    }

    if cli.write_config {
        config.save_to_file()?;
        println!("Configuration written to {}", cli.config.display());
        return Ok(());
    }

    if !(cli.fps.is_finite() && cli.fps > 0.0) {
        return Err(format!("--fps must be positive, got {}", cli.fps));
    }
    let dt = 1.0 / cli.fps;
    // A session that never pauses ends after its duration; leave headroom.
    let max_ticks = cli
        .ticks
        .unwrap_or_else(|| ((config.session.duration_seconds + 1.0) * cli.fps).ceil() as u64);

    let (mut world, cues) = init_world(config, cli.seed);
    let mut schedule = build_update_schedule();
    let mut player = ScriptedPlayer::new(cli.fire_interval, cli.hit_rate);

    for frame in 0..max_ticks {
        player.drive(&mut world, frame, dt);
        tick(&mut world, &mut schedule, dt);
        drain_cues(&cues);

        let session = world.resource::<TrainingSession>();
        if frame % HUD_LOG_EVERY == 0 {
            debug!("{}", session.snapshot().hud_text().replace('\n', " | "));
        }
        if session.is_finished() {
            info!("Session finished after {} frames", frame + 1);
            break;
        }
    }

    let snapshot = world.resource::<TrainingSession>().snapshot();
    shutdown(&mut world);

    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| format!("Failed to serialize summary: {}", e))?;
    println!("{json}");
    if let Some(path) = &cli.summary {
        std::fs::write(path, &json)
            .map_err(|e| format!("Failed to write summary to {}: {}", path.display(), e))?;
        info!("Summary written to {}", path.display());
    }
    Ok(())
}

fn drain_cues(cues: &Receiver<FlashCue>) {
    for cue in cues.try_iter() {
        info!(
            "Flash {:?}: intensity {:.2} at ({:.2}, {:.2}){}",
            cue.exposure,
            cue.intensity01,
            cue.viewport[0],
            cue.viewport[1],
            if cue.on_screen { "" } else { " off screen" }
        );
    }
}

/// Stand-in for a human at the mouse.
struct ScriptedPlayer {
    fire_interval: f64,
    hit_rate: f64,
    since_last_shot: f64,
}

impl ScriptedPlayer {
    fn new(fire_interval: f64, hit_rate: f64) -> Self {
        ScriptedPlayer {
            fire_interval: fire_interval.max(0.0),
            hit_rate: hit_rate.clamp(0.0, 1.0),
            since_last_shot: 0.0,
        }
    }

    /// Record this frame's input before the schedule runs.
    fn drive(&mut self, world: &mut World, frame: u64, dt: f64) {
        {
            let mut input = world.resource_mut::<PlayerInput>();
            if frame == 0 {
                input.lock_cursor.tap();
                return;
            }
            input.fire.release();
        }

        self.since_last_shot += dt;
        if self.since_last_shot < self.fire_interval {
            return;
        }
        self.since_last_shot = 0.0;

        if world.resource_mut::<GameRng>().chance(self.hit_rate) {
            self.aim_at_random_target(world);
        } else {
            let yaw = world.resource_mut::<GameRng>().range_f32(-90.0, 90.0);
            world.resource_mut::<PlayerCamera>().set_yaw_pitch(yaw, 0.0);
        }
        world.resource_mut::<PlayerInput>().fire.press();
    }

    fn aim_at_random_target(&self, world: &mut World) {
        let positions: Vec<_> = world
            .query_filtered::<&WorldPosition, With<Target>>()
            .iter(world)
            .map(|p| p.pos)
            .collect();
        let Some(i) = world.resource_mut::<GameRng>().index(positions.len()) else {
            return;
        };
        world.resource_mut::<PlayerCamera>().look_at(positions[i]);
    }
}
