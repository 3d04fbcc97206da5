//! Bridge between the flash spawner and whatever draws the flash.
//!
//! Use [`setup_flash_presentation`] once during initialization to create the
//! channel and insert the [`FlashPresentation`] resource; the returned
//! receiver belongs to the presentation side. Call
//! [`shutdown_flash_presentation`] during teardown to disconnect it.
//!
//! The channel is unbounded, so [`FlashPresentation::play`] never blocks the
//! scheduler. A presentation that went away is not an error.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;

use crate::events::flash::FlashCue;

/// Sending half of the flash cue channel.
#[derive(Resource, Debug, Clone)]
pub struct FlashPresentation {
    tx: Sender<FlashCue>,
}

impl FlashPresentation {
    pub fn new(tx: Sender<FlashCue>) -> Self {
        FlashPresentation { tx }
    }

    /// Forward a cue to the presentation.
    pub fn play(&self, cue: FlashCue) {
        if self.tx.send(cue).is_err() {
            debug!("Flash presentation disconnected; dropping cue");
        }
    }
}

/// Create the cue channel and register the sending side as a resource.
pub fn setup_flash_presentation(world: &mut World) -> Receiver<FlashCue> {
    let (tx, rx) = unbounded::<FlashCue>();
    world.insert_resource(FlashPresentation::new(tx));
    rx
}

/// Remove the bridge. Safe to call more than once.
pub fn shutdown_flash_presentation(world: &mut World) {
    if world.remove_resource::<FlashPresentation>().is_some() {
        debug!("Flash presentation shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exposure::FlashExposure;

    fn cue() -> FlashCue {
        FlashCue {
            intensity01: 1.0,
            exposure: FlashExposure::Front,
            viewport: [0.5, 0.5],
            on_screen: true,
        }
    }

    #[test]
    fn test_play_delivers_cue() {
        let mut world = World::new();
        let rx = setup_flash_presentation(&mut world);
        world.resource::<FlashPresentation>().play(cue());
        assert_eq!(rx.try_recv().ok(), Some(cue()));
    }

    #[test]
    fn test_play_after_receiver_dropped_does_not_panic() {
        let mut world = World::new();
        let rx = setup_flash_presentation(&mut world);
        drop(rx);
        world.resource::<FlashPresentation>().play(cue());
    }

    #[test]
    fn test_shutdown_twice_is_harmless() {
        let mut world = World::new();
        let _rx = setup_flash_presentation(&mut world);
        shutdown_flash_presentation(&mut world);
        shutdown_flash_presentation(&mut world);
        assert!(!world.contains_resource::<FlashPresentation>());
    }
}
