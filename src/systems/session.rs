//! Session clock systems.
//!
//! [`training_session_system`] advances the countdown with the frame's
//! scaled delta. [`sync_pause_time_scale`] then mirrors the paused flag onto
//! [`WorldTime::time_scale`] through the [`TimeScaleFreeze`] resource, so a
//! paused session stops every timer that reads `WorldTime::delta`.
//!
//! Both run before the spawners so that an expiry on this tick is visible to
//! them. [`sync_time_scale_before_frame`] applies the same rule outside the
//! schedule, ahead of the delta computation.

use bevy_ecs::prelude::*;

use crate::resources::session::TrainingSession;
use crate::resources::worldtime::{TimeScaleFreeze, WorldTime};

/// Tick the session countdown. Does nothing when no session is installed.
pub fn training_session_system(time: Res<WorldTime>, session: Option<ResMut<TrainingSession>>) {
    let Some(mut session) = session else {
        return;
    };
    // Avoid flagging the resource as changed on idle frames.
    if !session.is_active() {
        return;
    }
    session.update(time.delta);
}

/// Freeze time while the session is paused, restore it otherwise.
pub fn sync_pause_time_scale(
    session: Option<Res<TrainingSession>>,
    mut freeze: ResMut<TimeScaleFreeze>,
    mut time: ResMut<WorldTime>,
) {
    apply_pause_freeze(session.as_deref(), &mut freeze, &mut time);
}

/// Bring the time scale in line with the session before the frame's delta is
/// taken, so a reset or pause made between frames applies to the next frame.
pub fn sync_time_scale_before_frame(world: &mut World) {
    if !world.contains_resource::<TimeScaleFreeze>() || !world.contains_resource::<WorldTime>() {
        return;
    }
    world.resource_scope(|world, mut freeze: Mut<TimeScaleFreeze>| {
        world.resource_scope(|world, mut time: Mut<WorldTime>| {
            apply_pause_freeze(world.get_resource::<TrainingSession>(), &mut freeze, &mut time);
        });
    });
}

fn apply_pause_freeze(
    session: Option<&TrainingSession>,
    freeze: &mut TimeScaleFreeze,
    time: &mut WorldTime,
) {
    let should_freeze = session.is_some_and(|s| s.is_paused() && s.freezes_time_scale());

    if should_freeze {
        if !freeze.is_frozen() {
            freeze.freeze(time);
        }
    } else if freeze.is_frozen() {
        freeze.restore(time);
    }
}

/// Hand back any frozen time scale. Safe to call repeatedly.
pub fn restore_time_scale(world: &mut World) -> bool {
    if !world.contains_resource::<TimeScaleFreeze>() {
        return false;
    }
    world.resource_scope(|world, mut freeze: Mut<TimeScaleFreeze>| {
        match world.get_resource_mut::<WorldTime>() {
            Some(mut time) => freeze.restore(&mut time),
            None => false,
        }
    })
}
