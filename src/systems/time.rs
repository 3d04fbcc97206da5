//! Frame clock.
//!
//! [`update_world_time`] runs once per frame, outside the update schedule and
//! before it, so every system sees the same scaled delta. While a paused
//! session holds the time scale at zero the delta is zero as well.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance [`WorldTime`] by one frame of `dt` unscaled seconds.
pub fn update_world_time(world: &mut World, dt: f64) {
    world.resource_mut::<WorldTime>().advance(dt);
}
