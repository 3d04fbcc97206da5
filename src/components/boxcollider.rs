use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Axis-aligned box collider, centred on the entity position plus `offset`.
///
/// `size` is the unscaled full extent; the entity's scale multiplies both
/// `size` and `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec3,
    pub offset: Vec3,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            size: Vec3::new(width, height, depth),
            offset: Vec3::ZERO,
        }
    }

    /// Unit cube, the default target body.
    pub fn unit() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Modify BoxCollider with given offset
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Half extents after scaling. Negative sizes count as positive.
    pub fn extents(&self, scale: Vec3) -> Vec3 {
        (self.size * scale).abs() * 0.5
    }

    /// Returns (min, max) of the collider AABB for a given entity position and scale.
    pub fn aabb(&self, position: Vec3, scale: Vec3) -> (Vec3, Vec3) {
        let center = position + self.offset * scale;
        let half = self.extents(scale);
        (center - half, center + half)
    }

    /// Distance along a ray to the box, if the ray hits it within `max_distance`.
    ///
    /// `direction` must be normalized. A ray starting inside the box hits at `0`.
    pub fn ray_hit(
        &self,
        position: Vec3,
        scale: Vec3,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<f32> {
        let (min, max) = self.aabb(position, scale);
        let mut t_min = 0.0_f32;
        let mut t_max = max_distance;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            if d.abs() < f32::EPSILON {
                // Parallel to this slab: must already be between its planes.
                if o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (min[axis] - o) * inv;
            let mut t1 = (max[axis] - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}
