//! Input systems.
//!
//! - [`player_input_system`] turns the edges recorded in
//!   [`PlayerInput`] into session transitions and shots.
//! - [`clear_input_edges`] drops those edges at the end of the frame.
//!
//! Cursor lock drives the session: locking starts (or resumes) it, unlocking
//! or losing window focus pauses it. A shot is a ray from the camera centre
//! along its forward axis, tested against every target's box collider.
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{debug, info};

use crate::components::boxcollider::BoxCollider;
use crate::components::scale::Scale;
use crate::components::target::Target;
use crate::components::worldposition::WorldPosition;
use crate::events::target::TargetHitEvent;
use crate::resources::input::PlayerInput;
use crate::resources::playercamera::PlayerCamera;
use crate::resources::session::TrainingSession;

/// Longest distance a shot can travel.
pub const SHOT_RANGE: f32 = 100.0;

/// Apply this frame's player input to the cursor lock, the session and the
/// targets.
pub fn player_input_system(
    mut input: ResMut<PlayerInput>,
    mut session: Option<ResMut<TrainingSession>>,
    camera: Option<Res<PlayerCamera>>,
    targets: Query<(Entity, &WorldPosition, &Scale, &BoxCollider), With<Target>>,
    mut commands: Commands,
) {
    let mut suppress_shot = false;

    if !input.focused {
        if input.cursor_locked {
            set_cursor_lock(&mut input, session.as_deref_mut(), false);
        }
        return;
    }

    if !input.cursor_locked && input.lock_cursor.just_pressed {
        set_cursor_lock(&mut input, session.as_deref_mut(), true);
        suppress_shot = true;
    }

    if input.cursor_locked && input.unlock_cursor.just_pressed {
        set_cursor_lock(&mut input, session.as_deref_mut(), false);
    }

    if input.reset.just_pressed {
        if let Some(session) = session.as_deref_mut().filter(|s| s.is_finished()) {
            session.reset_session();
            if input.cursor_locked {
                session.start_session();
            }
        }
    }

    if !input.cursor_locked || suppress_shot || !input.fire.just_pressed {
        return;
    }
    if session.as_deref().is_some_and(|s| !s.is_active()) {
        return;
    }

    if let Some(session) = session.as_deref_mut() {
        session.register_shot();
    }
    let Some(camera) = camera else {
        debug!("Shot fired without a camera");
        return;
    };

    let Some((entity, distance)) = cast_shot(camera.position, camera.forward(), &targets) else {
        return;
    };
    if let Some(session) = session.as_deref_mut() {
        session.register_hit();
    }
    commands.trigger(TargetHitEvent { entity, distance });
}

/// Nearest target hit by a ray from `origin` along `direction`.
pub fn cast_shot(
    origin: Vec3,
    direction: Vec3,
    targets: &Query<(Entity, &WorldPosition, &Scale, &BoxCollider), With<Target>>,
) -> Option<(Entity, f32)> {
    let direction = direction.try_normalize()?;
    targets
        .iter()
        .filter_map(|(entity, pos, scale, collider)| {
            collider
                .ray_hit(pos.pos, scale.scale, origin, direction, SHOT_RANGE)
                .map(|t| (entity, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

fn set_cursor_lock(input: &mut PlayerInput, session: Option<&mut TrainingSession>, locked: bool) {
    input.cursor_locked = locked;
    info!("Cursor {}", if locked { "locked" } else { "released" });
    let Some(session) = session else {
        return;
    };
    if locked {
        session.start_session();
        session.set_paused(false);
    } else {
        session.set_paused(true);
    }
}

/// Clear press/release edges once every system has seen them.
pub fn clear_input_edges(mut input: ResMut<PlayerInput>) {
    input.end_frame();
}
