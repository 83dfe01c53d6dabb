pub mod constraints;
pub mod error;
pub mod types;

pub use constraints::validate_config;
pub use error::{Result, SwarmError};
pub use types::*;
