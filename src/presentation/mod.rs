//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the playground, the creation modal and the
//! notification toasts with ratatui, and maps keystrokes to app actions.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
