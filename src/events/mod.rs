//! Event types and observers used by the trainer.
//!
//! Submodules:
//! - [`flash`] – the cue sent to the flash presentation on detonation
//! - [`target`] – target hit notification and the observer that removes the target
pub mod flash;
pub mod target;
