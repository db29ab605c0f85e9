pub mod amount;
pub mod config;
pub mod errors;
pub mod validation;

pub use config::TrackerConfig;
pub use errors::TrackerError;
