//! Flash presentation cues.
//!
//! A [`FlashCue`] is sent by the flash spawner at the moment a flash
//! detonates. It carries everything an overlay needs to draw the effect and
//! nothing it could use to reach back into the session.
//!
//! # Related
//!
//! - [`crate::resources::flashpresentation::FlashPresentation`] – the channel the cue travels on
//! - [`crate::systems::flashspawner::flash_spawner_system`] – the producer

use serde::Serialize;

use crate::exposure::{ExposureReading, FlashExposure};

/// Fire-and-forget notification that a flash went off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlashCue {
    /// Strength of the flash as seen by the player, in `[0, 1]`.
    pub intensity01: f32,
    pub exposure: FlashExposure,
    /// Where the flash projects on screen; meaningful when `on_screen`.
    pub viewport: [f32; 2],
    pub on_screen: bool,
}

impl From<&ExposureReading> for FlashCue {
    fn from(reading: &ExposureReading) -> Self {
        FlashCue {
            intensity01: reading.intensity01,
            exposure: reading.exposure,
            viewport: reading.viewport.to_array(),
            on_screen: reading.on_screen,
        }
    }
}
