//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP creation service, the background
//! submission worker, configuration loading and log setup.

pub mod config;
pub mod http;
pub mod logging;
pub mod worker;

pub use config::*;
pub use http::*;
pub use logging::*;
pub use worker::*;
