//! World setup and the per-frame update schedule.
//!
//! [`init_world`] builds a ready-to-run training world from a
//! [`TrainingConfig`]: time, session, camera, input and RNG resources, the
//! flash presentation channel, the target hit observer, and one target
//! spawner plus one flash spawner. [`build_update_schedule`] chains the
//! systems in the order the session/spawner contract requires, and [`tick`]
//! advances everything by one frame.

use bevy_ecs::prelude::*;
use crossbeam_channel::Receiver;
use log::info;

use crate::components::flashspawner::FlashSpawner;
use crate::components::targetspawner::TargetSpawner;
use crate::components::worldposition::WorldPosition;
use crate::events::flash::FlashCue;
use crate::events::target::target_hit_observer;
use crate::resources::flashpresentation::{setup_flash_presentation, shutdown_flash_presentation};
use crate::resources::input::PlayerInput;
use crate::resources::playercamera::PlayerCamera;
use crate::resources::rng::GameRng;
use crate::resources::session::TrainingSession;
use crate::resources::trainingconfig::TrainingConfig;
use crate::resources::worldtime::{TimeScaleFreeze, WorldTime};
use crate::systems::flashspawner::flash_spawner_system;
use crate::systems::input::{clear_input_edges, player_input_system};
use crate::systems::session::{
    restore_time_scale, sync_pause_time_scale, sync_time_scale_before_frame, training_session_system,
};
use crate::systems::targetspawner::target_spawner_system;
use crate::systems::time::update_world_time;
use crate::systems::ttl::ttl_system;

/// Build a world for `config`.
///
/// `seed` fixes every random draw; `None` seeds from the OS. Returns the
/// world and the receiving end of the flash cue channel.
pub fn init_world(config: TrainingConfig, seed: Option<u64>) -> (World, Receiver<FlashCue>) {
    let config = config.normalized();
    let mut world = World::new();
    let mut rng = match seed {
        Some(seed) => GameRng::with_seed(seed),
        None => GameRng::default(),
    };

    let mut session = TrainingSession::new(&config.session);
    session.reset_session();
    if config.session.auto_start {
        session.start_session();
    }

    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(TimeScaleFreeze::new());
    world.insert_resource(PlayerCamera::from_settings(&config.camera));
    world.insert_resource(PlayerInput::default());
    world.insert_resource(session);
    let cues = setup_flash_presentation(&mut world);

    world.add_observer(target_hit_observer);

    world.spawn((
        WorldPosition::from_vec(config.targets.anchor),
        TargetSpawner::from_settings(&config.targets),
    ));
    world.spawn(FlashSpawner::from_settings(&config.flash, &mut rng));

    world.insert_resource(rng);
    info!(
        "Training world ready: {:.0}s session, {} targets max, auto start {}",
        config.session.duration_seconds,
        config.targets.max_alive_targets,
        config.session.auto_start
    );
    world.insert_resource(config);

    (world, cues)
}

/// The per-frame systems, chained so each sees the previous one's commands.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            player_input_system,
            training_session_system,
            sync_pause_time_scale,
            ttl_system,
            target_spawner_system,
            flash_spawner_system,
            clear_input_edges,
        )
            .chain(),
    );
    update
}

/// Advance the world by `dt` unscaled seconds.
///
/// The pause freeze is synced first so session changes made between frames
/// decide this frame's delta.
pub fn tick(world: &mut World, schedule: &mut Schedule, dt: f64) {
    sync_time_scale_before_frame(world);
    update_world_time(world, dt);
    schedule.run(world);
}

/// Tear down the pieces that outlive a frame. Safe to call more than once.
pub fn shutdown(world: &mut World) {
    restore_time_scale(world);
    shutdown_flash_presentation(world);
}
