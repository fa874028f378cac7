use std::fmt;
use std::sync::Arc;

use partwire_domain::error::{DispatchFault, Error, Result};
use partwire_domain::{ContractDescription, InstanceProvider, ServiceInstance};
use serde_json::Value;

/// Per-endpoint runtime: where call instances come from
#[derive(Clone, Default)]
pub struct DispatchRuntime {
    instance_provider: Option<Arc<dyn InstanceProvider>>,
    singleton_instance: Option<ServiceInstance>,
}

impl DispatchRuntime {
    pub fn instance_provider(&self) -> Option<&Arc<dyn InstanceProvider>> {
        self.instance_provider.as_ref()
    }

    pub fn set_instance_provider(&mut self, provider: Arc<dyn InstanceProvider>) {
        self.instance_provider = Some(provider);
    }

    pub fn singleton_instance(&self) -> Option<&ServiceInstance> {
        self.singleton_instance.as_ref()
    }

    /// A well-known instance; takes precedence over the instance provider
    pub fn set_singleton_instance(&mut self, instance: ServiceInstance) {
        self.singleton_instance = Some(instance);
    }
}

impl fmt::Debug for DispatchRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchRuntime")
            .field("has_instance_provider", &self.instance_provider.is_some())
            .field("singleton_instance", &self.singleton_instance)
            .finish()
    }
}

/// Dispatches calls arriving at one endpoint
#[derive(Debug)]
pub struct EndpointDispatcher {
    address: String,
    contract: ContractDescription,
    runtime: DispatchRuntime,
}

impl EndpointDispatcher {
    pub fn new(address: impl Into<String>, contract: ContractDescription) -> Self {
        Self {
            address: address.into(),
            contract,
            runtime: DispatchRuntime::default(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn contract(&self) -> &ContractDescription {
        &self.contract
    }

    pub fn is_metadata(&self) -> bool {
        self.contract.is_metadata()
    }

    pub fn runtime(&self) -> &DispatchRuntime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut DispatchRuntime {
        &mut self.runtime
    }

    /// Invoke `operation` on an instance obtained for this call
    ///
    /// Instances from the provider are released whether the operation
    /// succeeds or not.
    pub fn dispatch(&self, operation: &str, args: Value) -> Result<Value> {
        if !self.contract.has_operation(operation) {
            return Err(Error::unknown_operation(&self.contract.name, operation));
        }
        if let Some(instance) = self.runtime.singleton_instance() {
            return instance.invoke(operation, args);
        }

        let provider = self.runtime.instance_provider().ok_or_else(|| {
            Error::dispatch(
                DispatchFault::NoInstance,
                format!("No instance provider installed on endpoint {}", self.address),
            )
        })?;
        let instance = provider.get_instance()?;
        let result = instance.invoke(operation, args);
        provider.release_instance(instance);
        result
    }
}

/// Listener for one base address and the endpoints under it
#[derive(Debug)]
pub struct ChannelDispatcher {
    listen_address: String,
    endpoints: Vec<EndpointDispatcher>,
}

impl ChannelDispatcher {
    pub fn new(listen_address: impl Into<String>) -> Self {
        Self {
            listen_address: listen_address.into(),
            endpoints: Vec::new(),
        }
    }

    pub fn listen_address(&self) -> &str {
        &self.listen_address
    }

    pub fn endpoints(&self) -> &[EndpointDispatcher] {
        &self.endpoints
    }

    pub fn endpoints_mut(&mut self) -> &mut [EndpointDispatcher] {
        &mut self.endpoints
    }

    pub fn endpoint(&self, address: &str) -> Option<&EndpointDispatcher> {
        self.endpoints.iter().find(|e| e.address == address)
    }

    pub(crate) fn add_endpoint(&mut self, endpoint: EndpointDispatcher) {
        self.endpoints.push(endpoint);
    }
}
