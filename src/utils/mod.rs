pub mod config;
pub mod errors;

pub use config::{I18nConfig, DEFAULT_CONFIG_FILE};
pub use errors::{ApiError, I18nError, Result};
