//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! managing the playground selections, the creation modal, and notifications.

pub mod modal;
pub mod notifications;
pub mod playground;
pub mod state;

pub use modal::*;
pub use notifications::*;
pub use playground::*;
pub use state::*;
