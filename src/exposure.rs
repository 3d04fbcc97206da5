//! Flash exposure classification.
//!
//! Decides how a detonating flash was perceived by the player. The rule is
//! coarse: a flash that lands anywhere on screen is a full
//! frontal flash, one that does not is a successful "back flash".
//! [`FlashExposure::Side`] exists for data compatibility but this rule never
//! produces it.

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::resources::playercamera::PlayerCamera;

/// How a flash was perceived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FlashExposure {
    Front,
    Side,
    Back,
}

/// Outcome of classifying one flash against the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureReading {
    pub exposure: FlashExposure,
    pub intensity01: f32,
    /// Unsigned angle between the view direction and the flash, in degrees.
    pub angle_degrees: f32,
    pub viewport: Vec2,
    pub on_screen: bool,
}

/// Classify an on-screen decision into exposure and intensity.
///
/// `angle_degrees` is computed independently of the decision.
pub fn classify_exposure(
    camera_position: Vec3,
    camera_forward: Vec3,
    flash_position: Vec3,
    is_on_screen: bool,
) -> (FlashExposure, f32, f32) {
    let to_flash = flash_position - camera_position;
    let angle_degrees = match to_flash.try_normalize() {
        Some(dir) => camera_forward.angle_between(dir).to_degrees(),
        None => 0.0,
    };
    let angle_degrees = if angle_degrees.is_finite() {
        angle_degrees.clamp(0.0, 180.0)
    } else {
        0.0
    };

    if is_on_screen {
        (FlashExposure::Front, 1.0, angle_degrees)
    } else {
        (FlashExposure::Back, 0.0, angle_degrees)
    }
}

/// Project `flash_position` through `camera` and classify it.
pub fn evaluate_flash(camera: &PlayerCamera, flash_position: Vec3) -> ExposureReading {
    let (vp, on_screen) = camera.project(flash_position);
    let (exposure, intensity01, angle_degrees) =
        classify_exposure(camera.position, camera.forward(), flash_position, on_screen);
    ExposureReading {
        exposure,
        intensity01,
        angle_degrees,
        viewport: Vec2::new(vp.x, vp.y),
        on_screen,
    }
}
