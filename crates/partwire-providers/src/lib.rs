//! # partwire - Part Implementations
//!
//! Concrete parts that register themselves in the `PARTS` table. Linking
//! this crate (`extern crate partwire_providers;`) is enough to make them
//! selectable from configuration.
//!
//! ## Parts
//!
//! | Contract | Parts |
//! |----------|-------|
//! | [`Service`] | [`services::MyService`] |
//! | [`Greeting`] | [`services::GreetingService`] |
//! | [`SomeType`] | [`dependencies::SomeDependency`] |
//! | [`Greeter`] | [`greeter::MockGreeter`], [`greeter::ProductionGreeter`] |

// Re-export domain types commonly used with parts
pub use partwire_domain::error::{Error, Result};

/// Provider-specific constants
pub mod constants;

/// Service contracts and their dispatch tables
pub mod contracts;

/// Dependencies imported by services
pub mod dependencies;

/// Greeter variants
pub mod greeter;

/// Hosted services
pub mod services;

pub use contracts::{Greeter, Greeting, Service, SomeType};
