//! # partwire domain layer
//!
//! Core types shared by every partwire crate: the error taxonomy, type
//! identity, configuration value objects and the ports a service host
//! consumes (`ServiceObject`, `InstanceProvider`).
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | `Error`, `CompositionError` and the `Result` alias |
//! | [`constants`] | Namespaces and message fragments shared across layers |
//! | [`value_objects`] | `TypeInfo`, provider configuration elements, contracts |
//! | [`ports`] | Service object, disposal and instance provider traits |

/// Domain-wide constants
pub mod constants;
/// Error handling types
pub mod error;
/// Host-facing port traits
pub mod ports;
/// Immutable value objects
pub mod value_objects;

pub use error::{CompositionError, DispatchFault, Error, Result};
pub use ports::{Disposable, InstanceProvider, ServiceInstance, ServiceObject};
pub use value_objects::{
    CompositionSection, ContractDescription, ProviderElement, TypeInfo, VariantElement,
    VariantElements,
};
