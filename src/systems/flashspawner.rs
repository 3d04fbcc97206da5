//! Flash spawner system.
//!
//! Advances every [`FlashSpawner`] through its idle/pending cycle.
//!
//! # Behavior
//!
//! - A session revision change cancels the pending flash, despawns its
//!   indicator and draws a fresh interval
//! - While spawning is not permitted the timers stay frozen
//! - Idle: count down; at zero sample a position around the camera and arm
//!   the fuse (without a camera the interval is redrawn instead)
//! - Pending: burn the fuse; at zero detonate
//!
//! Detonation evaluates the flash against the [`PlayerCamera`], plays a
//! [`FlashCue`] on the [`FlashPresentation`] if one is installed, registers
//! the outcome on the session and schedules the next flash.
//!
//! # Ordering
//!
//! Runs **after** `training_session_system`.

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::debug;

use crate::components::flashspawner::{FlashPhase, FlashSpawner};
use crate::components::scale::Scale;
use crate::components::target::FlashIndicator;
use crate::components::worldposition::WorldPosition;
use crate::events::flash::FlashCue;
use crate::exposure::evaluate_flash;
use crate::resources::flashpresentation::FlashPresentation;
use crate::resources::playercamera::PlayerCamera;
use crate::resources::rng::GameRng;
use crate::resources::session::TrainingSession;
use crate::resources::worldtime::WorldTime;

pub fn flash_spawner_system(
    mut spawners: Query<(Entity, &mut FlashSpawner)>,
    mut session: Option<ResMut<TrainingSession>>,
    camera: Option<Res<PlayerCamera>>,
    presentation: Option<Res<FlashPresentation>>,
    time: Res<WorldTime>,
    mut rng: ResMut<GameRng>,
    mut commands: Commands,
) {
    let camera = camera.as_deref();
    let dt = time.delta;

    for (spawner_entity, mut spawner) in spawners.iter_mut() {
        if let Some(session) = session.as_deref() {
            let revision = session.revision();
            let last = spawner.last_session_revision.replace(revision);
            if let Some(last) = last
                && last != revision
                && spawner.clear_on_session_reset
            {
                debug!(
                    "Flash spawner {:?}: revision {} -> {}, cancelling",
                    spawner_entity, last, revision
                );
                despawn_indicator(&spawner, &mut commands);
                spawner.schedule_next(&mut rng);
            }
        }

        if !can_tick(&spawner, session.as_deref()) {
            continue;
        }

        match spawner.phase {
            FlashPhase::Idle { time_until_next } => {
                let time_until_next = time_until_next - dt;
                spawner.phase = FlashPhase::Idle { time_until_next };
                if time_until_next <= 0.0 {
                    spawn_flash(spawner_entity, &mut spawner, camera, &mut rng, &mut commands);
                }
            }
            FlashPhase::Pending {
                position,
                fuse_remaining,
                indicator,
            } => {
                let fuse_remaining = fuse_remaining - dt;
                spawner.phase = FlashPhase::Pending {
                    position,
                    fuse_remaining,
                    indicator,
                };
                if fuse_remaining <= 0.0 {
                    detonate(
                        spawner_entity,
                        &mut spawner,
                        position,
                        camera,
                        presentation.as_deref(),
                        session.as_deref_mut(),
                        &mut rng,
                        &mut commands,
                    );
                }
            }
        }
    }
}

fn can_tick(spawner: &FlashSpawner, session: Option<&TrainingSession>) -> bool {
    if !spawner.spawn_only_while_session_running {
        return true;
    }
    let Some(session) = session else {
        return false;
    };
    if !session.is_running() || session.is_finished() {
        return false;
    }
    !(session.is_paused() && !spawner.spawn_while_paused)
}

fn spawn_flash(
    spawner_entity: Entity,
    spawner: &mut FlashSpawner,
    camera: Option<&PlayerCamera>,
    rng: &mut GameRng,
    commands: &mut Commands,
) {
    let Some(camera) = camera else {
        debug!("Flash spawner {:?}: no camera, rescheduling", spawner_entity);
        spawner.schedule_next(rng);
        return;
    };

    let position = spawner.sample_position(camera.position, camera.flat_forward(), rng);
    let indicator = spawner.show_indicator.then(|| {
        commands
            .spawn((
                FlashIndicator,
                WorldPosition::from_vec(position),
                Scale::uniform(spawner.indicator_scale),
            ))
            .id()
    });
    spawner.arm(position, indicator);
    debug!("Flash spawner {:?}: armed at {}", spawner_entity, position);
}

#[allow(clippy::too_many_arguments)]
fn detonate(
    spawner_entity: Entity,
    spawner: &mut FlashSpawner,
    position: Vec3,
    camera: Option<&PlayerCamera>,
    presentation: Option<&FlashPresentation>,
    session: Option<&mut TrainingSession>,
    rng: &mut GameRng,
    commands: &mut Commands,
) {
    despawn_indicator(spawner, commands);

    let Some(camera) = camera else {
        debug!("Flash spawner {:?}: no camera, flash dropped", spawner_entity);
        spawner.schedule_next(rng);
        return;
    };

    let reading = evaluate_flash(camera, position);
    debug!(
        "Flash spawner {:?}: detonated at {} -> {:?} ({:.1} deg)",
        spawner_entity, position, reading.exposure, reading.angle_degrees
    );

    if let Some(presentation) = presentation {
        presentation.play(FlashCue::from(&reading));
    }
    if let Some(session) = session {
        session.register_flash(reading.exposure, reading.intensity01, reading.angle_degrees);
    }

    spawner.schedule_next(rng);
}

fn despawn_indicator(spawner: &FlashSpawner, commands: &mut Commands) {
    if let Some(indicator) = spawner.indicator() {
        commands.entity(indicator).try_despawn();
    }
}
