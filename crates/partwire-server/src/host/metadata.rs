use partwire_domain::constants::{
    METADATA_CONTRACT_NAME, METADATA_CONTRACT_NAMESPACE, METADATA_OPERATION,
};
use partwire_domain::error::{Error, Result};
use partwire_domain::{ContractDescription, ServiceObject};
use serde_json::{Value, json};

use super::description::ServiceDescription;

/// Contract of the built-in metadata endpoint
pub fn metadata_contract() -> ContractDescription {
    ContractDescription::new(METADATA_CONTRACT_NAME)
        .with_namespace(METADATA_CONTRACT_NAMESPACE)
        .with_operation(METADATA_OPERATION)
}

/// Describes a host's service type and endpoints
#[derive(Debug, Clone)]
pub struct MetadataService {
    document: Value,
}

impl MetadataService {
    pub fn describe(description: &ServiceDescription) -> Self {
        Self {
            document: json!({
                "service": description.service_type().name(),
                "endpoints": description.endpoints(),
            }),
        }
    }
}

impl ServiceObject for MetadataService {
    fn invoke(&self, operation: &str, _args: Value) -> Result<Value> {
        if operation == METADATA_OPERATION {
            Ok(self.document.clone())
        } else {
            Err(Error::unknown_operation(METADATA_CONTRACT_NAME, operation))
        }
    }
}
