//! Aim trainer core library.
//!
//! This module exposes the trainer's ECS components, resources, systems, and
//! events for use by the headless driver, integration tests, and any
//! front end that wants to render a session.

pub mod components;
pub mod events;
pub mod exposure;
pub mod game;
pub mod resources;
pub mod systems;
