//! Application configuration
//!
//! `partwire.toml` merged over defaults and `PARTWIRE_*` environment
//! variables with figment.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig, ServerConfig};
