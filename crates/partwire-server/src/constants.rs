//! Server-specific constants
//!
//! JSON-RPC error codes and protocol-related values.

// ============================================================================
// JSON-RPC ERROR CODES (Standard)
// ============================================================================

/// JSON-RPC Invalid request error code
pub const JSONRPC_INVALID_REQUEST: i32 = -32600;

/// JSON-RPC Method not found error code
pub const JSONRPC_METHOD_NOT_FOUND: i32 = -32601;

/// JSON-RPC Invalid params error code
pub const JSONRPC_INVALID_PARAMS: i32 = -32602;

/// JSON-RPC Internal error code
pub const JSONRPC_INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC protocol version
pub const JSONRPC_VERSION: &str = "2.0";

// ============================================================================
// HOST CONSTANTS
// ============================================================================

/// Relative address of the metadata endpoint
pub const METADATA_ENDPOINT_ADDRESS: &str = "mex";

/// Default client request timeout in seconds
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// BOOTSTRAP CONSTANTS
// ============================================================================

/// Base path of the hosted data service
pub const DATA_SERVICE_PATH: &str = "data";

/// Base path of the hosted greeting service
pub const GREETING_SERVICE_PATH: &str = "greeting";

/// Base path of the self-hosted service
pub const SELFHOST_SERVICE_PATH: &str = "selfhost";

/// Endpoint address of the self-hosted service, relative to its base
pub const SELFHOST_ENDPOINT_ADDRESS: &str = "percall";

/// Health checks made while waiting for a self-hosted transport
pub const READY_POLL_ATTEMPTS: u32 = 50;

/// Delay between health checks in milliseconds
pub const READY_POLL_INTERVAL_MS: u64 = 100;
