//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `flashpresentation` – channel bridge that carries flash cues to the presenter
//! - `input` – per-frame player actions and cursor lock
//! - `playercamera` – first-person camera pose and lens
//! - `rng` – seedable random source shared by the spawners
//! - `session` – training session state machine and statistics
//! - `trainingconfig` – INI-backed settings for session, spawners and camera
//! - `worldtime` – simulation time, delta and the pause time-scale freeze
pub mod flashpresentation;
pub mod input;
pub mod playercamera;
pub mod rng;
pub mod session;
pub mod trainingconfig;
pub mod worldtime;
