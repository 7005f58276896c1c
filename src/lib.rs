pub mod config;
pub mod error;
pub mod math;
pub mod model;
pub mod operations;
pub mod topology;

pub use config::EngineConfig;
pub use error::{GeoplanError, Result};
