//! Configured composition
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`provider_loader`] | Configuration document to `RegisteredTypeSet` |
//! | [`module_resolver`] | Absolute locations of external module files |
//! | [`factory`] | Builds containers from type sets and application config |
//! | [`configured`] | The process-wide container, initialised once |

pub mod configured;
pub mod factory;
pub mod module_resolver;
pub mod provider_loader;

pub use configured::{ContainerCell, configured_container, init_configured_container};
pub use factory::{build_container, create_container};
pub use module_resolver::ModuleResolver;
pub use provider_loader::ProviderRegistryLoader;
