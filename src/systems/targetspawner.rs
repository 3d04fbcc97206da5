//! Target spawner system.
//!
//! Drives every [`TargetSpawner`] once per frame against the shared
//! [`TrainingSession`].
//!
//! # Behavior
//!
//! - Drops pool handles whose target no longer exists
//! - Caches the session revision and running flag the first time a session
//!   is seen, filling the pool if the session is already running
//! - Clears the pool and the spawn accumulator when the revision changes
//! - Tops the pool up to capacity on the not-running to running edge
//! - Accumulates scaled time and spawns one target per whole interval while
//!   the pool is below capacity
//!
//! # Ordering
//!
//! Must run **after** `training_session_system` so an expiry on this tick is
//! already visible, and after `ttl_system` so expired targets free their slot.

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::debug;

use crate::components::scale::Scale;
use crate::components::target::Target;
use crate::components::targetspawner::TargetSpawner;
use crate::components::ttl::Ttl;
use crate::components::worldposition::WorldPosition;
use crate::resources::rng::GameRng;
use crate::resources::session::TrainingSession;
use crate::resources::worldtime::WorldTime;

pub fn target_spawner_system(
    mut spawners: Query<(Entity, &WorldPosition, &mut TargetSpawner)>,
    live_targets: Query<(), With<Target>>,
    session: Option<Res<TrainingSession>>,
    time: Res<WorldTime>,
    mut rng: ResMut<GameRng>,
    mut commands: Commands,
) {
    let session = session.as_deref();

    for (spawner_entity, anchor, mut spawner) in spawners.iter_mut() {
        spawner
            .active_targets
            .retain(|&target| live_targets.contains(target));

        if let Some(session) = session {
            sync_with_session(
                spawner_entity,
                anchor.pos,
                &mut spawner,
                session,
                &mut rng,
                &mut commands,
            );
        }

        if !can_spawn(&spawner, session) {
            continue;
        }

        spawner.spawn_timer += time.delta;
        while spawner.spawn_timer >= spawner.spawn_interval_seconds
            && spawner.active_targets.len() < spawner.max_alive_targets
        {
            spawner.spawn_timer -= spawner.spawn_interval_seconds;
            spawn_one(spawner_entity, anchor.pos, &mut spawner, &mut rng, &mut commands);
        }
    }
}

fn sync_with_session(
    spawner_entity: Entity,
    anchor: Vec3,
    spawner: &mut TargetSpawner,
    session: &TrainingSession,
    rng: &mut GameRng,
    commands: &mut Commands,
) {
    let Some(last_revision) = spawner.last_session_revision else {
        spawner.last_session_revision = Some(session.revision());
        spawner.last_running = session.is_running();
        if spawner.fill_to_max_on_session_start && session.is_running() {
            fill_to_max(spawner_entity, anchor, spawner, rng, commands);
        }
        return;
    };

    if last_revision != session.revision() {
        spawner.last_session_revision = Some(session.revision());
        if spawner.clear_targets_on_session_reset {
            debug!(
                "Target spawner {:?}: revision {} -> {}, clearing {} targets",
                spawner_entity,
                last_revision,
                session.revision(),
                spawner.active_targets.len()
            );
            for target in spawner.active_targets.drain(..) {
                commands.entity(target).try_despawn();
            }
            spawner.spawn_timer = 0.0;
        }
    }

    let started_this_frame = session.is_running() && !spawner.last_running;
    spawner.last_running = session.is_running();

    if spawner.fill_to_max_on_session_start && started_this_frame {
        fill_to_max(spawner_entity, anchor, spawner, rng, commands);
    }
}

fn can_spawn(spawner: &TargetSpawner, session: Option<&TrainingSession>) -> bool {
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

fn fill_to_max(
    spawner_entity: Entity,
    anchor: Vec3,
    spawner: &mut TargetSpawner,
    rng: &mut GameRng,
    commands: &mut Commands,
) {
    while spawner.active_targets.len() < spawner.max_alive_targets {
        spawn_one(spawner_entity, anchor, spawner, rng, commands);
    }
}

fn spawn_one(
    spawner_entity: Entity,
    anchor: Vec3,
    spawner: &mut TargetSpawner,
    rng: &mut GameRng,
    commands: &mut Commands,
) {
    let scale = spawner.sample_scale(rng);
    let padding = spawner.spawn_padding(scale);
    let position = spawner.sample_point(anchor, padding, rng);

    let mut entity = commands.spawn((
        Target::owned_by(spawner_entity),
        WorldPosition::from_vec(position),
        Scale::uniform(scale),
    ));
    if let Some(collider) = spawner.target_collider {
        entity.insert(collider);
    }
    if spawner.target_lifetime_seconds > 0.0 {
        entity.insert(Ttl::new(spawner.target_lifetime_seconds));
    }
    let target = entity.id();

    debug!(
        "Target spawner {:?}: spawned {:?} at {} (scale {:.2})",
        spawner_entity, target, position, scale
    );
    spawner.active_targets.push(target);
}
