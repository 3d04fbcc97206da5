//! Simulation time resources.
//!
//! [`WorldTime`] carries the scaled frame delta every system reads.
//! [`TimeScaleFreeze`] suspends wall-clock progression while the session is
//! paused and puts the previous scale back when play resumes.

use bevy_ecs::prelude::Resource;
use log::debug;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f64,
    pub delta: f64,
    pub time_scale: f64,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Start a new frame of `dt` unscaled seconds. Negative deltas count as zero.
    pub fn advance(&mut self, dt: f64) {
        self.delta = dt.max(0.0) * self.time_scale;
        self.elapsed += self.delta;
        self.frame_count += 1;
    }
}

/// Saved time scale for the duration of a pause.
///
/// `freeze` remembers the scale only the first time it is called in a
/// suspend, so repeated freezes never overwrite the value with `0.0`.
/// `restore` hands the saved scale back once and is a no-op afterwards.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct TimeScaleFreeze {
    saved_scale: Option<f64>,
}

impl TimeScaleFreeze {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_frozen(&self) -> bool {
        self.saved_scale.is_some()
    }

    /// Stop time progression, remembering the current scale.
    pub fn freeze(&mut self, time: &mut WorldTime) {
        if self.saved_scale.is_none() {
            self.saved_scale = Some(time.time_scale);
            debug!("Freezing time scale (was {})", time.time_scale);
        }
        time.time_scale = 0.0;
    }

    /// Put back the scale saved by [`TimeScaleFreeze::freeze`], if any.
    ///
    /// Returns `true` when a scale was actually restored.
    pub fn restore(&mut self, time: &mut WorldTime) -> bool {
        match self.saved_scale.take() {
            Some(scale) => {
                time.time_scale = scale;
                debug!("Restored time scale to {}", scale);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_applies_time_scale() {
        let mut time = WorldTime::default().with_time_scale(0.5);
        time.advance(0.2);
        time.advance(-1.0);
        assert_eq!(time.delta, 0.0);
        assert!((time.elapsed - 0.1).abs() < 1e-12);
        assert_eq!(time.frame_count, 2);
    }

    #[test]
    fn test_frozen_scale_yields_zero_delta() {
        let mut time = WorldTime::default();
        let mut freeze = TimeScaleFreeze::new();
        freeze.freeze(&mut time);
        time.advance(1.0);
        assert_eq!(time.delta, 0.0);
        assert_eq!(time.elapsed, 0.0);
    }

    #[test]
    fn test_freeze_then_restore_returns_previous_scale() {
        let mut time = WorldTime::default().with_time_scale(0.5);
        let mut freeze = TimeScaleFreeze::new();

        freeze.freeze(&mut time);
        assert_eq!(time.time_scale, 0.0);
        assert!(freeze.is_frozen());

        assert!(freeze.restore(&mut time));
        assert_eq!(time.time_scale, 0.5);
        assert!(!freeze.is_frozen());
    }

    #[test]
    fn test_double_freeze_keeps_first_saved_scale() {
        let mut time = WorldTime::default();
        let mut freeze = TimeScaleFreeze::new();

        freeze.freeze(&mut time);
        freeze.freeze(&mut time);
        freeze.restore(&mut time);

        assert_eq!(time.time_scale, 1.0);
    }

    #[test]
    fn test_restore_is_idempotent() {
        let mut time = WorldTime::default();
        let mut freeze = TimeScaleFreeze::new();

        freeze.freeze(&mut time);
        assert!(freeze.restore(&mut time));
        time.time_scale = 2.0;
        assert!(!freeze.restore(&mut time));
        assert_eq!(time.time_scale, 2.0);
    }
}
