//! Target spawner component.
//!
//! A [`TargetSpawner`] keeps a bounded pool of live targets inside a box
//! volume centred on its owner's
//! [`WorldPosition`](super::worldposition::WorldPosition).
//!
//! # How It Works
//!
//! 1. An entity is spawned with a `WorldPosition` and a `TargetSpawner`
//!    built from [`TargetSpawnerSettings`].
//! 2. The `target_spawner_system` runs each frame:
//!    - compacts the pool, dropping handles of despawned targets
//!    - clears the pool when the session revision moved
//!    - tops the pool up when the session just started
//!    - accumulates time and spawns one target per elapsed interval
//!
//! The spawner never receives callbacks from its targets. Whatever destroys a
//! target (a hit, a lifetime, a reset) just despawns it.
//!
//! # Related
//!
//! - [`crate::systems::targetspawner::target_spawner_system`] – system that drives spawners
//! - [`crate::components::target::Target`] – marker carried by every spawned target

use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::components::boxcollider::BoxCollider;
use crate::resources::rng::GameRng;
use crate::resources::trainingconfig::{MIN_INTERVAL_SECONDS, TargetSpawnerSettings};

/// Bounded pool of live targets with interval replenishment.
#[derive(Component, Debug, Clone)]
pub struct TargetSpawner {
    pub spawn_only_while_session_running: bool,
    pub spawn_while_paused: bool,
    pub clear_targets_on_session_reset: bool,
    pub fill_to_max_on_session_start: bool,
    /// Pool capacity. Always at least 1.
    pub max_alive_targets: usize,
    /// Seconds between spawns. Always at least [`MIN_INTERVAL_SECONDS`].
    pub spawn_interval_seconds: f64,
    /// `0` disables automatic despawn.
    pub target_lifetime_seconds: f64,
    /// Full extents of the spawn volume.
    pub area_size: Vec3,
    pub target_scale_min: f32,
    pub target_scale_max: f32,
    /// Collider given to spawned targets; `None` spawns them without one and
    /// without placement padding.
    pub target_collider: Option<BoxCollider>,

    pub(crate) active_targets: Vec<Entity>,
    pub(crate) spawn_timer: f64,
    pub(crate) last_running: bool,
    /// Revision seen on the last tick; `None` until a session is found.
    pub(crate) last_session_revision: Option<u64>,
}

impl Default for TargetSpawner {
    fn default() -> Self {
        Self::from_settings(&TargetSpawnerSettings::default())
    }
}

impl TargetSpawner {
    pub fn from_settings(settings: &TargetSpawnerSettings) -> Self {
        TargetSpawner {
            spawn_only_while_session_running: settings.spawn_only_while_session_running,
            spawn_while_paused: settings.spawn_while_paused,
            clear_targets_on_session_reset: settings.clear_targets_on_session_reset,
            fill_to_max_on_session_start: settings.fill_to_max_on_session_start,
            max_alive_targets: settings.max_alive_targets.max(1),
            spawn_interval_seconds: settings.spawn_interval_seconds.max(MIN_INTERVAL_SECONDS),
            target_lifetime_seconds: settings.target_lifetime_seconds.max(0.0),
            area_size: settings.area_size.abs(),
            target_scale_min: settings.target_scale_min,
            target_scale_max: settings.target_scale_max,
            target_collider: Some(BoxCollider::unit()),
            active_targets: Vec::new(),
            spawn_timer: 0.0,
            last_running: false,
            last_session_revision: None,
        }
    }

    pub fn with_collider(mut self, collider: Option<BoxCollider>) -> Self {
        self.target_collider = collider;
        self
    }

    /// Handles currently in the pool. May include targets despawned since the
    /// last compaction.
    pub fn active_targets(&self) -> &[Entity] {
        &self.active_targets
    }

    pub fn alive_count(&self) -> usize {
        self.active_targets.len()
    }

    pub fn spawn_timer(&self) -> f64 {
        self.spawn_timer
    }

    /// Draw a target scale from the normalized scale range.
    pub fn sample_scale(&self, rng: &mut GameRng) -> f32 {
        rng.range_f32(self.target_scale_min, self.target_scale_max)
    }

    /// Half extents a target of `scale` needs to stay inside the volume.
    pub fn spawn_padding(&self, scale: f32) -> Vec3 {
        self.target_collider
            .map(|c| c.extents(Vec3::splat(scale)))
            .unwrap_or(Vec3::ZERO)
    }

    /// Uniform point in the volume around `anchor`, shrunk by `padding`.
    pub fn sample_point(&self, anchor: Vec3, padding: Vec3, rng: &mut GameRng) -> Vec3 {
        let half = self.area_size * 0.5;
        anchor
            + Vec3::new(
                sample_axis(half.x, padding.x, rng),
                sample_axis(half.y, padding.y, rng),
                sample_axis(half.z, padding.z, rng),
            )
    }
}

fn sample_axis(half_extent: f32, padding: f32, rng: &mut GameRng) -> f32 {
    let usable = (half_extent - padding.max(0.0)).max(0.0);
    if usable <= 0.0 {
        return 0.0;
    }
    rng.range_f32(-usable, usable)
}
