//! Target hit event and the observer that removes hit targets.
//!
//! The shot ray cast in
//! [`player_input_system`](crate::systems::input::player_input_system)
//! triggers a [`TargetHitEvent`] for the nearest target it struck, after the
//! hit has been counted on the session. [`target_hit_observer`] despawns that
//! target; its spawner notices the free slot on its next compaction.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::target::Target;

/// Fired when a shot hits a target.
#[derive(Event, Debug, Clone, Copy)]
pub struct TargetHitEvent {
    pub entity: Entity,
    /// Distance from the camera to the hit point along the shot ray.
    pub distance: f32,
}

/// Despawn the target named by a [`TargetHitEvent`].
///
/// Entities that are no longer targets (already despawned, or recycled) are
/// left alone.
pub fn target_hit_observer(
    trigger: On<TargetHitEvent>,
    mut commands: Commands,
    targets: Query<&Target>,
) {
    let event = trigger.event();
    let Ok(target) = targets.get(event.entity) else {
        return;
    };
    debug!(
        "Target {:?} hit at {:.2} (spawner {:?})",
        event.entity, event.distance, target.spawner
    );
    commands.entity(event.entity).try_despawn();
}
