pub mod config;
pub mod error;
pub mod types;

pub use config::CalcConfig;
pub use error::{CalcError, Result};
pub use types::{RequestToken, Role};
