//! Trainer systems.
//!
//! This module groups the ECS systems that advance the training world each
//! frame. [`crate::game::build_update_schedule`] chains them in order.
//!
//! Submodules overview
//! - [`flashspawner`] – schedule, arm and detonate flashes
//! - [`input`] – cursor lock, session control and shot ray casts
//! - [`session`] – session countdown and the pause time-scale freeze
//! - [`targetspawner`] – keep target pools filled and in sync with resets
//! - [`time`] – update simulation time and delta
//! - [`ttl`] – despawn entities whose lifetime ran out

pub mod flashspawner;
pub mod input;
pub mod session;
pub mod targetspawner;
pub mod time;
pub mod ttl;
