//! Domain constants

/// Contract namespace reserved for host metadata endpoints.
///
/// Dispatch behaviors never install instance providers on endpoints whose
/// contract lives in this namespace.
pub const METADATA_CONTRACT_NAMESPACE: &str = "urn:partwire:metadata";

/// Namespace given to service contracts that do not declare one
pub const DEFAULT_CONTRACT_NAMESPACE: &str = "urn:partwire:service";

/// Name of the built-in metadata contract
pub const METADATA_CONTRACT_NAME: &str = "Metadata";

/// Operation exposed by the built-in metadata contract
pub const METADATA_OPERATION: &str = "GetDescription";

/// Line separating causes in aggregated configuration errors
pub const ERROR_CHAIN_SEPARATOR: &str = "---------------------------";

/// Element name used when an error concerns the composition section itself
pub const COMPOSITION_ELEMENT: &str = "<composition>";
