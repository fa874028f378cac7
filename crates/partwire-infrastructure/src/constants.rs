//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "partwire.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "partwire";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "PARTWIRE";

/// Separator for nested keys in environment variables (`PARTWIRE_SERVER__PORT`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Prefix of the variables that override a role's selected variant
pub const SELECT_ENV_PREFIX: &str = "PARTWIRE_SELECT_";

/// Name of the composition section in configuration documents
pub const COMPOSITION_SECTION: &str = "composition";

/// First line of aggregated composition configuration errors
pub const COMPOSITION_ERROR_HEADER: &str = "The composition configuration contains errors...";

// ============================================================================
// SERVER CONSTANTS
// ============================================================================

/// Default server host
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding an `EnvFilter` directive
pub const LOG_FILTER_ENV: &str = "PARTWIRE_LOG";
