use std::fmt;
use std::sync::Arc;

use partwire_domain::{ContractDescription, TypeInfo};
use serde::Serialize;

use super::behavior::ServiceBehavior;

/// Lifecycle state of a service host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostState {
    Created,
    Opened,
    Closed,
}

/// An endpoint: absolute address plus the contract served there
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceEndpoint {
    pub address: String,
    pub contract: ContractDescription,
}

/// Static description of a hosted service
pub struct ServiceDescription {
    service_type: TypeInfo,
    behaviors: Vec<Arc<dyn ServiceBehavior>>,
    endpoints: Vec<ServiceEndpoint>,
}

impl ServiceDescription {
    pub fn new(service_type: TypeInfo) -> Self {
        Self {
            service_type,
            behaviors: Vec::new(),
            endpoints: Vec::new(),
        }
    }

    pub fn service_type(&self) -> TypeInfo {
        self.service_type
    }

    pub fn behaviors(&self) -> &[Arc<dyn ServiceBehavior>] {
        &self.behaviors
    }

    pub fn endpoints(&self) -> &[ServiceEndpoint] {
        &self.endpoints
    }

    pub(crate) fn add_behavior(&mut self, behavior: Arc<dyn ServiceBehavior>) {
        self.behaviors.push(behavior);
    }

    pub(crate) fn add_endpoint(&mut self, endpoint: ServiceEndpoint) {
        self.endpoints.push(endpoint);
    }
}

impl fmt::Debug for ServiceDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescription")
            .field("service_type", &self.service_type.name())
            .field("behaviors", &self.behaviors.len())
            .field("endpoints", &self.endpoints)
            .finish()
    }
}
