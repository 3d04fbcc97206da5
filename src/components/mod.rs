//! ECS components for entities.
//!
//! This module groups the component types attached to entities in the
//! training world: spatial data for targets and flash markers, their
//! colliders and lifetimes, and the two spawners that create them.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned box used for shot ray casts and spawn padding
//! - [`flashspawner`] – idle/pending flash scheduler around the player camera
//! - [`scale`] – per-axis scale factor
//! - [`target`] – markers for spawned targets and pending-flash indicators
//! - [`targetspawner`] – bounded, self-replenishing pool of targets
//! - [`ttl`] – time-to-live countdown for automatic despawn
//! - [`worldposition`] – world-space position of an entity

pub mod boxcollider;
pub mod flashspawner;
pub mod scale;
pub mod target;
pub mod targetspawner;
pub mod ttl;
pub mod worldposition;
