//! Player input integration tests: cursor lock, pause, reset and shots.

#![allow(dead_code)]

use bevy_ecs::prelude::*;
use glam::Vec3;

use aimtrainer::components::boxcollider::BoxCollider;
use aimtrainer::components::scale::Scale;
use aimtrainer::components::target::Target;
use aimtrainer::components::worldposition::WorldPosition;
use aimtrainer::events::target::target_hit_observer;
use aimtrainer::game::{build_update_schedule, tick};
use aimtrainer::resources::input::PlayerInput;
use aimtrainer::resources::playercamera::PlayerCamera;
use aimtrainer::resources::rng::GameRng;
use aimtrainer::resources::session::{SessionState, TrainingSession};
use aimtrainer::resources::worldtime::{TimeScaleFreeze, WorldTime};

fn make_world(duration: f64) -> World {
    let mut session = TrainingSession::with_duration(duration);
    session.reset_session();

    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(TimeScaleFreeze::new());
    world.insert_resource(PlayerCamera::default().with_position(Vec3::ZERO));
    world.insert_resource(PlayerInput::default());
    world.insert_resource(GameRng::with_seed(3));
    world.insert_resource(session);
    world.add_observer(target_hit_observer);
    world
}

fn spawn_target(world: &mut World, pos: Vec3) -> Entity {
    world
        .spawn((
            Target::default(),
            WorldPosition::from_vec(pos),
            Scale::uniform(1.0),
            BoxCollider::unit(),
        ))
        .id()
}

fn input(world: &mut World) -> Mut<'_, PlayerInput> {
    world.resource_mut::<PlayerInput>()
}

fn state(world: &World) -> SessionState {
    world.resource::<TrainingSession>().state()
}

/// Lock the cursor and let one frame go by.
fn lock(world: &mut World, schedule: &mut Schedule) {
    input(world).lock_cursor.tap();
    tick(world, schedule, 0.0);
}

fn fire(world: &mut World, schedule: &mut Schedule) {
    input(world).fire.tap();
    tick(world, schedule, 0.0);
}

#[test]
fn test_lock_starts_session() {
    let mut world = make_world(60.0);
    let mut schedule = build_update_schedule();

    lock(&mut world, &mut schedule);
    assert!(world.resource::<PlayerInput>().cursor_locked);
    assert_eq!(state(&world), SessionState::Running);
}

#[test]
fn test_lock_click_does_not_shoot() {
    let mut world = make_world(60.0);
    let mut schedule = build_update_schedule();
    let target = spawn_target(&mut world, Vec3::new(0.0, 0.0, -5.0));

    {
        let mut input = input(&mut world);
        input.lock_cursor.tap();
        input.fire.tap();
    }
    tick(&mut world, &mut schedule, 0.0);

    assert_eq!(world.resource::<TrainingSession>().shots_fired(), 0);
    assert!(world.get_entity(target).is_ok());
}

#[test]
fn test_fire_while_unlocked_is_ignored() {
    let mut world = make_world(60.0);
    let mut schedule = build_update_schedule();
    world.resource_mut::<TrainingSession>().start_session();

    fire(&mut world, &mut schedule);
    assert_eq!(world.resource::<TrainingSession>().shots_fired(), 0);
}

#[test]
fn test_shot_hits_and_removes_target() {
    let mut world = make_world(60.0);
    let mut schedule = build_update_schedule();
    let target = spawn_target(&mut world, Vec3::new(0.0, 0.0, -5.0));
    lock(&mut world, &mut schedule);

    fire(&mut world, &mut schedule);

    let session = world.resource::<TrainingSession>();
    assert_eq!(session.shots_fired(), 1);
    assert_eq!(session.shots_hit(), 1);
    assert!(world.get_entity(target).is_err());
}

#[test]
fn test_shot_hits_only_nearest_target() {
    let mut world = make_world(60.0);
    let mut schedule = build_update_schedule();
    let far = spawn_target(&mut world, Vec3::new(0.0, 0.0, -20.0));
    let near = spawn_target(&mut world, Vec3::new(0.0, 0.0, -5.0));
    lock(&mut world, &mut schedule);

    fire(&mut world, &mut schedule);

    assert!(world.get_entity(near).is_err());
    assert!(world.get_entity(far).is_ok());
    assert_eq!(world.resource::<TrainingSession>().shots_hit(), 1);
}

#[test]
fn test_missed_shot_counts_only_the_shot() {
    let mut world = make_world(60.0);
    let mut schedule = build_update_schedule();
    let target = spawn_target(&mut world, Vec3::new(0.0, 0.0, -5.0));
    lock(&mut world, &mut schedule);
    world.resource_mut::<PlayerCamera>().set_forward(Vec3::X);

    fire(&mut world, &mut schedule);

    let session = world.resource::<TrainingSession>();
    assert_eq!(session.shots_fired(), 1);
    assert_eq!(session.shots_hit(), 0);
    assert_eq!(session.accuracy(), 0.0);
    assert!(world.get_entity(target).is_ok());
}

#[test]
fn test_target_beyond_shot_range_is_missed() {
    let mut world = make_world(60.0);
    let mut schedule = build_update_schedule();
    let target = spawn_target(&mut world, Vec3::new(0.0, 0.0, -150.0));
    lock(&mut world, &mut schedule);

    fire(&mut world, &mut schedule);

    assert_eq!(world.resource::<TrainingSession>().shots_hit(), 0);
    assert!(world.get_entity(target).is_ok());
}

#[test]
fn test_unlock_pauses_and_relock_resumes() {
    let mut world = make_world(60.0);
    let mut schedule = build_update_schedule();
    lock(&mut world, &mut schedule);

    input(&mut world).unlock_cursor.tap();
    tick(&mut world, &mut schedule, 0.0);
    assert!(!world.resource::<PlayerInput>().cursor_locked);
    assert_eq!(state(&world), SessionState::Paused);
    assert_eq!(world.resource::<WorldTime>().time_scale, 0.0);

    // Shots while paused are not counted.
    fire(&mut world, &mut schedule);
    assert_eq!(world.resource::<TrainingSession>().shots_fired(), 0);

    lock(&mut world, &mut schedule);
    assert_eq!(state(&world), SessionState::Running);
    assert_eq!(world.resource::<WorldTime>().time_scale, 1.0);
}

#[test]
fn test_focus_loss_releases_cursor_and_pauses() {
    let mut world = make_world(60.0);
    let mut schedule = build_update_schedule();
    lock(&mut world, &mut schedule);

    input(&mut world).focused = false;
    tick(&mut world, &mut schedule, 0.0);

    assert!(!world.resource::<PlayerInput>().cursor_locked);
    assert_eq!(state(&world), SessionState::Paused);
}

#[test]
fn test_unfocused_window_ignores_lock_requests() {
    let mut world = make_world(60.0);
    let mut schedule = build_update_schedule();
    input(&mut world).focused = false;

    lock(&mut world, &mut schedule);
    assert!(!world.resource::<PlayerInput>().cursor_locked);
    assert_eq!(state(&world), SessionState::Idle);
}

#[test]
fn test_reset_only_honoured_after_finish() {
    let mut world = make_world(1.0);
    let mut schedule = build_update_schedule();
    lock(&mut world, &mut schedule);
    let revision = world.resource::<TrainingSession>().revision();

    input(&mut world).reset.tap();
    tick(&mut world, &mut schedule, 0.0);
    assert_eq!(world.resource::<TrainingSession>().revision(), revision);

    tick(&mut world, &mut schedule, 2.0);
    assert_eq!(state(&world), SessionState::Finished);

    input(&mut world).reset.tap();
    tick(&mut world, &mut schedule, 0.0);
    let session = world.resource::<TrainingSession>();
    assert_eq!(session.revision(), revision + 1);
    // Still locked, so the fresh session starts straight away.
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.time_remaining(), 1.0);
}

#[test]
fn test_reset_while_unlocked_leaves_session_idle() {
    let mut world = make_world(1.0);
    let mut schedule = build_update_schedule();
    lock(&mut world, &mut schedule);
    tick(&mut world, &mut schedule, 2.0);
    assert_eq!(state(&world), SessionState::Finished);

    {
        let mut input = input(&mut world);
        input.unlock_cursor.tap();
        input.reset.tap();
    }
    tick(&mut world, &mut schedule, 0.0);

    assert!(!world.resource::<PlayerInput>().cursor_locked);
    assert_eq!(state(&world), SessionState::Idle);
}

#[test]
fn test_edges_are_cleared_after_the_frame() {
    let mut world = make_world(60.0);
    let mut schedule = build_update_schedule();

    input(&mut world).fire.tap();
    tick(&mut world, &mut schedule, 0.0);

    let input = world.resource::<PlayerInput>();
    assert!(!input.fire.just_pressed);
    assert!(!input.fire.just_released);
}
