//! Lifetime expiry.
//!
//! [`ttl_system`] ticks every [`Ttl`] with the scaled frame delta and
//! despawns what ran out. It runs before the target spawner so an expired
//! target's slot can be refilled in the same frame.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::target::Target;
use crate::components::ttl::Ttl;
use crate::resources::worldtime::WorldTime;

pub fn ttl_system(
    time: Res<WorldTime>,
    mut lifetimes: Query<(Entity, &mut Ttl, Option<&Target>)>,
    mut commands: Commands,
) {
    if time.delta <= 0.0 {
        return;
    }
    for (entity, mut ttl, target) in lifetimes.iter_mut() {
        if !ttl.tick(time.delta) {
            continue;
        }
        match target.and_then(|t| t.spawner) {
            Some(spawner) => debug!("Target {:?} of spawner {:?} expired", entity, spawner),
            None => debug!("Lifetime of {:?} expired", entity),
        }
        commands.entity(entity).try_despawn();
    }
}
