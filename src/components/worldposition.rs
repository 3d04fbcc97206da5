use bevy_ecs::prelude::Component;
use glam::Vec3;

/// World-space position (pivot) of an entity.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPosition {
    pub pos: Vec3,
}

impl WorldPosition {
    pub fn from_vec(pos: Vec3) -> Self {
        Self { pos }
    }
}
