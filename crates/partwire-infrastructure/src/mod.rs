//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns and the pieces that turn a configuration
//! file into a ready composition container.
//!
//! ### Configuration & Composition
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | `partwire.toml` loading with figment |
//! | [`composition`] | Provider registry loading, module resolution, configured container |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context helpers and cause-chain rendering |

pub mod composition;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use composition::{
    ContainerCell, ModuleResolver, ProviderRegistryLoader, build_container,
    configured_container, create_container, init_configured_container,
};
pub use config::{AppConfig, ConfigLoader, LoggingConfig, ServerConfig};
pub use error_ext::ErrorContext;
