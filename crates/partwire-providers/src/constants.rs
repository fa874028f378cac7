//! Provider constants

/// Module name the parts of this crate register under
pub const MODULE_NAME: &str = "partwire_providers";

/// Contract names
pub const SERVICE_CONTRACT: &str = "Service";
pub const GREETING_CONTRACT: &str = "Greeting";

/// Operation names
pub const GET_DATA_OPERATION: &str = "GetData";
pub const GREET_OPERATION: &str = "Greet";
pub const VARIANT_OPERATION: &str = "Variant";
