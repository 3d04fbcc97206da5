//! Flash spawner component.
//!
//! A [`FlashSpawner`] schedules one flash at a time around the player camera.
//! Each flash goes through two phases:
//!
//! ```text
//! Idle { time_until_next } ──timer ≤ 0──▶ Pending { position, fuse } ──fuse ≤ 0──▶ detonate ─▶ Idle
//! ```
//!
//! Detonation projects the flash through the camera, classifies the exposure,
//! plays a [`FlashCue`](crate::events::flash::FlashCue) and records the result
//! on the session. A session reset cancels whatever is pending.
//!
//! # Related
//!
//! - [`crate::systems::flashspawner::flash_spawner_system`] – system that drives spawners
//! - [`crate::exposure::evaluate_flash`] – exposure classification

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};

use crate::resources::rng::GameRng;
use crate::resources::trainingconfig::{FlashSpawnerSettings, MIN_FLASH_INTERVAL_SECONDS};

/// Shortest fuse a pending flash can burn.
pub const MIN_FUSE_SECONDS: f64 = 0.01;

/// Where a spawner is in its schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlashPhase {
    /// Waiting for the next flash.
    Idle { time_until_next: f64 },
    /// A flash is armed at `position`.
    Pending {
        position: Vec3,
        fuse_remaining: f64,
        /// Visual marker, present only when indicators are enabled.
        indicator: Option<Entity>,
    },
}

#[derive(Component, Debug, Clone)]
pub struct FlashSpawner {
    pub spawn_only_while_session_running: bool,
    pub spawn_while_paused: bool,
    pub clear_on_session_reset: bool,
    pub show_indicator: bool,
    pub min_interval_seconds: f64,
    pub max_interval_seconds: f64,
    pub fuse_seconds: f64,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Half-angle of the yaw cone around the camera's flat forward.
    pub horizontal_angle_range_degrees: f32,
    pub height_offset: f32,
    pub height_variance: f32,
    /// Reported thresholds. The on-screen rule does not consult them.
    pub full_flash_angle_degrees: f32,
    pub back_flash_angle_degrees: f32,
    pub indicator_scale: f32,

    pub(crate) phase: FlashPhase,
    pub(crate) last_session_revision: Option<u64>,
}

impl FlashSpawner {
    /// Build a spawner and draw its first interval.
    pub fn from_settings(settings: &FlashSpawnerSettings, rng: &mut GameRng) -> Self {
        let mut spawner = FlashSpawner {
            spawn_only_while_session_running: settings.spawn_only_while_session_running,
            spawn_while_paused: settings.spawn_while_paused,
            clear_on_session_reset: settings.clear_on_session_reset,
            show_indicator: settings.show_indicator,
            min_interval_seconds: settings.min_interval_seconds.max(MIN_FLASH_INTERVAL_SECONDS),
            max_interval_seconds: settings.max_interval_seconds.max(MIN_FLASH_INTERVAL_SECONDS),
            fuse_seconds: settings.fuse_seconds.max(MIN_FUSE_SECONDS),
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
            horizontal_angle_range_degrees: yaw_range(settings.horizontal_angle_range_degrees),
            height_offset: if settings.height_offset.is_finite() {
                settings.height_offset
            } else {
                0.0
            },
            height_variance: settings.height_variance.max(0.0),
            full_flash_angle_degrees: settings.full_flash_angle_degrees,
            back_flash_angle_degrees: settings.back_flash_angle_degrees,
            indicator_scale: settings.indicator_scale,
            phase: FlashPhase::Idle {
                time_until_next: 0.0,
            },
            last_session_revision: None,
        };
        spawner.schedule_next(rng);
        spawner
    }

    pub fn phase(&self) -> FlashPhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, FlashPhase::Pending { .. })
    }

    /// Indicator of the pending flash, if any.
    pub fn indicator(&self) -> Option<Entity> {
        match self.phase {
            FlashPhase::Pending { indicator, .. } => indicator,
            FlashPhase::Idle { .. } => None,
        }
    }

    /// Go idle with a fresh interval drawn from the interval range.
    pub fn schedule_next(&mut self, rng: &mut GameRng) {
        self.phase = FlashPhase::Idle {
            time_until_next: rng.range_f64(self.min_interval_seconds, self.max_interval_seconds),
        };
    }

    /// Arm a flash at `position`.
    pub fn arm(&mut self, position: Vec3, indicator: Option<Entity>) {
        self.phase = FlashPhase::Pending {
            position,
            fuse_remaining: self.fuse_seconds.max(MIN_FUSE_SECONDS),
            indicator,
        };
    }

    /// Random flash position around a camera at `origin` facing `flat_forward`.
    pub fn sample_position(&self, origin: Vec3, flat_forward: Vec3, rng: &mut GameRng) -> Vec3 {
        let range = self.horizontal_angle_range_degrees;
        let yaw = rng.range_f32(-range, range).to_radians();
        let dir = Quat::from_axis_angle(Vec3::Y, yaw) * flat_forward;
        let distance = rng.range_f32(self.min_distance, self.max_distance);

        let mut position = origin + dir * distance;
        position.y = origin.y
            + self.height_offset
            + rng.range_f32(-self.height_variance, self.height_variance);
        position
    }
}

fn yaw_range(degrees: f32) -> f32 {
    if degrees.is_finite() {
        degrees.clamp(0.0, 180.0)
    } else {
        0.0
    }
}
