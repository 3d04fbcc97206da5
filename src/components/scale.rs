use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Per-axis scale applied to an entity and its collider.
#[derive(Component, Clone, Debug, Copy, PartialEq)]
pub struct Scale {
    pub scale: Vec3,
}
impl Scale {
    pub fn uniform(s: f32) -> Self {
        Self {
            scale: Vec3::splat(s),
        }
    }
}
impl Default for Scale {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}
