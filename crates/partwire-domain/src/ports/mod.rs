//! Domain Port Interfaces
//!
//! Contracts between the service host and whatever supplies the objects
//! that handle calls.
//!
//! - **service** - objects that handle calls and their optional disposal
//! - **instance** - per-call provisioning of service objects

/// Per-call instance provisioning
pub mod instance;
/// Service objects and disposal
pub mod service;

pub use instance::InstanceProvider;
pub use service::{Disposable, ServiceInstance, ServiceObject, decode_arguments};
