//! # partwire
//!
//! Hosts services whose per-call instances come from a composition container
//! assembled from configuration-selected parts.
//!
//! A `[composition]` section names roles and, per role, the variant tag that
//! is active. Only the parts listed under that tag are registered; the
//! container then resolves each hosted service with its imports for every
//! incoming call and releases it afterwards.
//!
//! ## Example
//!
//! ```ignore
//! use partwire::infrastructure::ProviderRegistryLoader;
//! use partwire::application::CompositionContainer;
//! use partwire::providers::Greeter;
//!
//! let types = ProviderRegistryLoader::new().load_str(document)?;
//! let container = CompositionContainer::new(&types);
//! let greeter = container.get_exported_value::<dyn Greeter>()?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - errors, contracts, instance provider port, configuration model
//! - `application` - composition container and the part registry
//! - `infrastructure` - configuration, logging, provider loading
//! - `providers` - the demo parts
//! - `server` - service host, dispatch behavior, JSON-RPC transport

/// Domain layer - errors, ports and value objects
pub mod domain {
    pub use partwire_domain::*;
}

/// Application layer - composition engine and part registry
pub mod application {
    pub use partwire_application::*;
}

/// Infrastructure layer - configuration, logging and container loading
pub mod infrastructure {
    pub use partwire_infrastructure::*;
}

/// Demo parts
pub mod providers {
    pub use partwire_providers::*;
}

/// Server layer - hosts, behaviors and transport
pub mod server {
    pub use partwire_server::*;
}

pub use domain::{Error, Result};

pub use application::{CompositionContainer, PartEntry};
pub use infrastructure::{AppConfig, ConfigLoader, ProviderRegistryLoader};
pub use server::{
    ComposedServiceHostFactory, ComposedSingletonServiceHostFactory, ServiceClient, ServiceHost,
    run_selfhost, run_server,
};
