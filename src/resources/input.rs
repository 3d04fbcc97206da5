//! Per-frame player input resource.
//!
//! Captures the handful of edge-triggered actions the trainer reacts to. A
//! platform layer (or a scripted driver) presses and releases actions; the
//! [`player_input_system`](crate::systems::input::player_input_system) reads
//! the edges, and [`PlayerInput::end_frame`] clears them once the frame is
//! done.
use bevy_ecs::prelude::Resource;

/// Boolean action state with press/release edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolState {
    /// Whether the action is currently held.
    pub active: bool,
    /// Whether the action was pressed this frame.
    pub just_pressed: bool,
    /// Whether the action was released this frame.
    pub just_released: bool,
}

impl BoolState {
    pub fn press(&mut self) {
        if !self.active {
            self.just_pressed = true;
        }
        self.active = true;
    }

    pub fn release(&mut self) {
        if self.active {
            self.just_released = true;
        }
        self.active = false;
    }

    /// Press and release within the same frame.
    pub fn tap(&mut self) {
        self.press();
        self.release();
    }

    pub fn clear_edges(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Resource capturing the per-frame input relevant to a training session.
#[derive(Resource, Debug, Clone)]
pub struct PlayerInput {
    /// Primary fire.
    pub fire: BoolState,
    /// Mouse click while the cursor is free; locks the cursor.
    pub lock_cursor: BoolState,
    /// Escape while the cursor is locked; frees it.
    pub unlock_cursor: BoolState,
    /// Reset key; only honoured once the session has finished.
    pub reset: BoolState,
    /// Whether the game window has focus.
    pub focused: bool,
    /// Current cursor lock, owned by the input system.
    pub cursor_locked: bool,
}

impl Default for PlayerInput {
    fn default() -> Self {
        Self {
            fire: BoolState::default(),
            lock_cursor: BoolState::default(),
            unlock_cursor: BoolState::default(),
            reset: BoolState::default(),
            focused: true,
            cursor_locked: false,
        }
    }
}

impl PlayerInput {
    /// Drop this frame's press/release edges, keeping held state.
    pub fn end_frame(&mut self) {
        self.fire.clear_edges();
        self.lock_cursor.clear_edges();
        self.unlock_cursor.clear_edges();
        self.reset.clear_edges();
    }
}
