use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CONTRACT_NAMESPACE, METADATA_CONTRACT_NAMESPACE};

/// Description of a service contract exposed on an endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDescription {
    /// Contract name
    pub name: String,
    /// Contract namespace
    pub namespace: String,
    /// Operation names the contract accepts
    pub operations: Vec<String>,
}

impl ContractDescription {
    /// Contract in the default service namespace with no operations
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: DEFAULT_CONTRACT_NAMESPACE.to_string(),
            operations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operations.push(operation.into());
        self
    }

    pub fn has_operation(&self, operation: &str) -> bool {
        self.operations.iter().any(|op| op == operation)
    }

    /// Whether this contract belongs to the host metadata namespace
    pub fn is_metadata(&self) -> bool {
        self.namespace == METADATA_CONTRACT_NAMESPACE
    }
}
