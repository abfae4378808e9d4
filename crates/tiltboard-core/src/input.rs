//! Per-tick input snapshot.
//!
//! The host samples its input device once per tick and hands the core a plain
//! set of booleans; the core never polls anything itself.

use serde::{Deserialize, Serialize};

/// Key-down states for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    /// Raise the left pin (W in the reference binding).
    pub left_up: bool,
    /// Lower the left pin (S).
    pub left_down: bool,
    /// Raise the right pin (I).
    pub right_up: bool,
    /// Lower the right pin (K).
    pub right_down: bool,
    /// Restart after a loss (ESC).
    pub restart: bool,
}

impl InputState {
    /// Snapshot with no keys held.
    pub const IDLE: InputState = InputState {
        left_up: false,
        left_down: false,
        right_up: false,
        right_down: false,
        restart: false,
    };
}
