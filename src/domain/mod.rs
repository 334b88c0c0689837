pub mod models;
pub mod services;
pub mod errors;
pub mod ports;

pub use models::*;
pub use services::*;
pub use errors::*;
pub use ports::*;
