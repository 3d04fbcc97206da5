//! Shootable target marker.
//!
//! A target is any entity carrying [`Target`] together with a
//! [`WorldPosition`](super::worldposition::WorldPosition),
//! [`Scale`](super::scale::Scale) and
//! [`BoxCollider`](super::boxcollider::BoxCollider). Its liveness is the
//! entity itself: once despawned (hit, expired, cleared) the `Entity` handle
//! goes stale and every pool holding it drops it on the next compaction.

use bevy_ecs::prelude::*;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Target {
    /// The spawner that owns this target, if any.
    pub spawner: Option<Entity>,
}

impl Target {
    pub fn owned_by(spawner: Entity) -> Self {
        Target {
            spawner: Some(spawner),
        }
    }
}

/// Visual marker for a flash that is about to detonate.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlashIndicator;
