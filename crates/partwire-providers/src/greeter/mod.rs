//! Greeter variants
//!
//! Two implementations of the [`Greeter`](crate::Greeter) role. Configuration
//! picks one by tag (`mock` or `production`); registering both makes the role
//! ambiguous.

mod mock;
mod production;

pub use mock::MockGreeter;
pub use production::ProductionGreeter;
#[cfg(test)]
pub(crate) use {mock::MOCK_GREETER_PART, production::PRODUCTION_GREETER_PART};

/// Tag of the mock variant
pub const MOCK_VARIANT: &str = "mock";

/// Tag of the production variant
pub const PRODUCTION_VARIANT: &str = "production";
