//! Domain Value Objects
//!
//! Immutable values shared across layers.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`TypeInfo`] | Runtime identity and display name of a Rust type |
//! | [`CompositionSection`] | Parsed `[composition]` configuration section |
//! | [`ProviderElement`] | One role with its selected variant tag |
//! | [`VariantElement`] | One candidate implementation of a role |
//! | [`ContractDescription`] | Name, namespace and operations of a service contract |

/// Service contract descriptions
pub mod contract;
/// Provider configuration elements
pub mod provider;
/// Runtime type identity
pub mod type_info;

pub use contract::ContractDescription;
pub use provider::{CompositionSection, ProviderElement, VariantElement, VariantElements};
pub use type_info::TypeInfo;
