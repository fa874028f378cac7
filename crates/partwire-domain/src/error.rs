//! Error handling types

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for partwire
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A configured type identifier could not be resolved to a registered part
    #[error("Type load error: {message}")]
    TypeLoad {
        /// Description of the failed lookup
        message: String,
    },

    /// A configured module location does not exist on disk
    #[error("Could not load physical module file {}", path.display())]
    ModuleNotFound {
        /// Absolute, normalised location that was checked
        path: PathBuf,
    },

    /// Composition engine failure, propagated unchanged
    #[error(transparent)]
    Composition(#[from] CompositionError),

    /// Call dispatch failure
    #[error("Dispatch error ({fault}): {message}")]
    Dispatch {
        /// Classification used by transports to pick a fault code
        fault: DispatchFault,
        /// Description of the failure
        message: String,
    },

    /// Fault returned by a remote service
    #[error("Service fault ({code}): {message}")]
    Fault {
        /// JSON-RPC error code reported by the remote side
        code: i32,
        /// Remote error message
        message: String,
    },

    /// Network-related error
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

/// Classification of dispatch failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchFault {
    /// No endpoint listens on the requested address
    EndpointNotFound,
    /// The endpoint contract has no such operation
    UnknownOperation,
    /// Operation arguments could not be decoded
    InvalidArguments,
    /// The host is not in a state that accepts calls
    HostState,
    /// No instance could be provided for the call
    NoInstance,
}

impl std::fmt::Display for DispatchFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::EndpointNotFound => "endpoint not found",
            Self::UnknownOperation => "unknown operation",
            Self::InvalidArguments => "invalid arguments",
            Self::HostState => "host state",
            Self::NoInstance => "no instance",
        };
        f.write_str(name)
    }
}

/// Failures raised while resolving exports from a composition container
#[derive(Error, Debug, Clone)]
pub enum CompositionError {
    /// No part exports the requested contract
    #[error("No exports were found that match the contract '{contract}'")]
    NoExports {
        /// Requested contract
        contract: &'static str,
    },

    /// More than one part exports the requested contract
    #[error(
        "More than one export was found that matches the contract '{contract}': {}",
        candidates.join(", ")
    )]
    Ambiguous {
        /// Requested contract
        contract: &'static str,
        /// Every part that matched
        candidates: Vec<&'static str>,
    },

    /// A nested import of a part could not be satisfied
    #[error("Cannot satisfy import '{contract}' of part '{part}'")]
    ImportFailed {
        /// Importing part
        part: &'static str,
        /// Imported contract
        contract: &'static str,
        /// Underlying failure
        #[source]
        cause: Box<CompositionError>,
    },

    /// The import graph contains a cycle
    #[error("Circular import detected: {}", chain.join(" -> "))]
    Cycle {
        /// Parts under construction, ending with the repeated one
        chain: Vec<&'static str>,
    },

    /// The catalog failed to build the requested contract
    #[error("Injection of '{contract}' failed: {message}")]
    Injection {
        /// Requested contract
        contract: &'static str,
        /// Failure reported by the catalog
        message: String,
    },
}

impl Error {
    /// Short name of the error kind, used when rendering cause chains
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "ConfigurationError",
            Self::TypeLoad { .. } => "TypeLoadError",
            Self::ModuleNotFound { .. } => "ModuleNotFoundError",
            Self::Composition(_) => "CompositionError",
            Self::Dispatch { .. } => "DispatchError",
            Self::Fault { .. } => "ServiceFault",
            Self::Network { .. } => "NetworkError",
            Self::Internal { .. } => "InternalError",
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create the error reported when an element lacks a mandatory attribute
    pub fn missing_attribute(element: &str, attribute: &str, provider: &str) -> Self {
        Self::configuration(format!(
            "Element \"{element}\" does not contain mandatory \"{attribute}\" attribute (in the {provider} provider config)"
        ))
    }
}

// Type resolution error creation methods
impl Error {
    /// Create a type load error
    pub fn type_load<S: Into<String>>(message: S) -> Self {
        Self::TypeLoad {
            message: message.into(),
        }
    }

    /// Create a module-not-found error for an absolute location
    pub fn module_not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::ModuleNotFound { path: path.into() }
    }
}

// Dispatch error creation methods
impl Error {
    /// Create a dispatch error
    pub fn dispatch<S: Into<String>>(fault: DispatchFault, message: S) -> Self {
        Self::Dispatch {
            fault,
            message: message.into(),
        }
    }

    /// Create an unknown-operation dispatch error
    pub fn unknown_operation(contract: &str, operation: &str) -> Self {
        Self::dispatch(
            DispatchFault::UnknownOperation,
            format!("Operation '{operation}' is not part of contract '{contract}'"),
        )
    }

    /// Create an invalid-arguments dispatch error
    pub fn invalid_arguments<S: Into<String>>(operation: &str, message: S) -> Self {
        Self::dispatch(
            DispatchFault::InvalidArguments,
            format!("Invalid arguments for '{operation}': {}", message.into()),
        )
    }

    /// Fault classification, if this is a dispatch error
    pub fn dispatch_fault(&self) -> Option<DispatchFault> {
        match self {
            Self::Dispatch { fault, .. } => Some(*fault),
            _ => None,
        }
    }
}

// Network error creation methods
impl Error {
    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a remote fault error
    pub fn fault<S: Into<String>>(code: i32, message: S) -> Self {
        Self::Fault {
            code,
            message: message.into(),
        }
    }
}

impl Error {
    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
