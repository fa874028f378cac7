use std::sync::Arc;

use partwire_domain::error::{DispatchFault, Error, Result};
use partwire_domain::{ContractDescription, ServiceInstance, TypeInfo};
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, info};

use super::behavior::ServiceBehavior;
use super::description::{HostState, ServiceDescription, ServiceEndpoint};
use super::dispatcher::{ChannelDispatcher, EndpointDispatcher};
use super::metadata::{MetadataService, metadata_contract};
use crate::constants::METADATA_ENDPOINT_ADDRESS;

/// Hosts one service type on a set of base addresses
///
/// Endpoints and behaviors are added while the host is `Created`. `open`
/// validates and applies every behavior once; from then on the host accepts
/// calls through [`dispatch`](Self::dispatch) until it is closed.
#[derive(Debug)]
pub struct ServiceHost {
    description: ServiceDescription,
    base_addresses: Vec<Url>,
    channel_dispatchers: Vec<ChannelDispatcher>,
    singleton: Option<ServiceInstance>,
    state: HostState,
}

impl ServiceHost {
    /// Host for `service_type` listening under `base_addresses`
    pub fn new<I, S>(service_type: TypeInfo, base_addresses: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let base_addresses = base_addresses
            .into_iter()
            .map(|address| normalize_base(address.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let channel_dispatchers = base_addresses
            .iter()
            .map(|base| ChannelDispatcher::new(base.as_str()))
            .collect();

        Ok(Self {
            description: ServiceDescription::new(service_type),
            base_addresses,
            channel_dispatchers,
            singleton: None,
            state: HostState::Created,
        })
    }

    /// Serve every call with `instance` instead of per-call instances
    #[must_use]
    pub fn with_singleton(mut self, instance: ServiceInstance) -> Self {
        self.singleton = Some(instance);
        self
    }

    pub fn add_behavior(&mut self, behavior: Arc<dyn ServiceBehavior>) -> Result<()> {
        self.ensure_created("add a behavior to")?;
        self.description.add_behavior(behavior);
        Ok(())
    }

    /// Expose `contract` at `address`
    ///
    /// A relative address is added under every base address; an absolute one
    /// gets a channel dispatcher of its own unless it falls under a base
    /// address.
    pub fn add_service_endpoint(
        &mut self,
        contract: ContractDescription,
        address: &str,
    ) -> Result<()> {
        self.ensure_created("add an endpoint to")?;

        let addresses = if is_absolute(address) {
            vec![normalize_endpoint(None, address)?]
        } else if self.base_addresses.is_empty() {
            return Err(Error::configuration(format!(
                "No base address to resolve relative endpoint address '{address}'"
            )));
        } else {
            self.base_addresses
                .iter()
                .map(|base| normalize_endpoint(Some(base), address))
                .collect::<Result<Vec<_>>>()?
        };

        for absolute in addresses {
            let channel = self.channel_for(&absolute);
            channel.add_endpoint(EndpointDispatcher::new(absolute.as_str(), contract.clone()));
            debug!(address = %absolute, contract = %contract.name, "endpoint added");
            self.description.add_endpoint(ServiceEndpoint {
                address: absolute.into(),
                contract: contract.clone(),
            });
        }
        Ok(())
    }

    /// Expose the built-in metadata contract at `mex`
    pub fn add_metadata_endpoint(&mut self) -> Result<()> {
        self.add_service_endpoint(metadata_contract(), METADATA_ENDPOINT_ADDRESS)
    }

    /// Validate and apply behaviors, then start accepting calls
    pub fn open(&mut self) -> Result<()> {
        self.ensure_created("open")?;
        for behavior in self.description.behaviors() {
            behavior.validate(&self.description)?;
        }

        let metadata = ServiceInstance::new(Arc::new(MetadataService::describe(&self.description)));
        for channel in &mut self.channel_dispatchers {
            for endpoint in channel.endpoints_mut() {
                if endpoint.is_metadata() {
                    endpoint.runtime_mut().set_singleton_instance(metadata.clone());
                } else if let Some(singleton) = &self.singleton {
                    endpoint.runtime_mut().set_singleton_instance(singleton.clone());
                }
            }
        }

        for behavior in self.description.behaviors() {
            behavior.apply_dispatch_behavior(&self.description, &mut self.channel_dispatchers);
        }

        self.state = HostState::Opened;
        info!(
            service = self.description.service_type().name(),
            endpoints = self.description.endpoints().len(),
            "service host opened"
        );
        Ok(())
    }

    pub fn close(&mut self) {
        if self.state != HostState::Closed {
            self.state = HostState::Closed;
            info!(service = self.description.service_type().name(), "service host closed");
        }
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    pub fn description(&self) -> &ServiceDescription {
        &self.description
    }

    pub fn base_addresses(&self) -> &[Url] {
        &self.base_addresses
    }

    pub fn channel_dispatchers(&self) -> &[ChannelDispatcher] {
        &self.channel_dispatchers
    }

    pub fn singleton(&self) -> Option<&ServiceInstance> {
        self.singleton.as_ref()
    }

    pub fn has_endpoint(&self, address: &str) -> bool {
        self.find_endpoint(address).is_some()
    }

    /// Invoke `operation` on the endpoint at `address`
    ///
    /// Relative addresses resolve against the first base address.
    pub fn dispatch(&self, address: &str, operation: &str, args: Value) -> Result<Value> {
        if self.state != HostState::Opened {
            return Err(Error::dispatch(
                DispatchFault::HostState,
                format!("Service host is {:?} and does not accept calls", self.state),
            ));
        }
        let endpoint = self.find_endpoint(address).ok_or_else(|| {
            Error::dispatch(
                DispatchFault::EndpointNotFound,
                format!("No endpoint listens on '{address}'"),
            )
        })?;
        debug!(address = endpoint.address(), operation, "dispatching call");
        endpoint.dispatch(operation, args)
    }

    fn find_endpoint(&self, address: &str) -> Option<&EndpointDispatcher> {
        let absolute = if is_absolute(address) {
            normalize_endpoint(None, address).ok()?
        } else {
            normalize_endpoint(Some(self.base_addresses.first()?), address).ok()?
        };
        self.channel_dispatchers
            .iter()
            .find_map(|channel| channel.endpoint(absolute.as_str()))
    }

    fn channel_for(&mut self, endpoint: &Url) -> &mut ChannelDispatcher {
        let prefix = format!("{}/", endpoint.as_str().trim_end_matches('/'));
        let index = self
            .channel_dispatchers
            .iter()
            .position(|channel| prefix.starts_with(channel.listen_address()));
        match index {
            Some(index) => &mut self.channel_dispatchers[index],
            None => {
                let mut listen = endpoint.clone();
                listen.set_path("/");
                self.channel_dispatchers.push(ChannelDispatcher::new(listen.as_str()));
                let last = self.channel_dispatchers.len() - 1;
                &mut self.channel_dispatchers[last]
            }
        }
    }

    fn ensure_created(&self, action: &str) -> Result<()> {
        if self.state == HostState::Created {
            Ok(())
        } else {
            Err(Error::dispatch(
                DispatchFault::HostState,
                format!("Cannot {action} a service host that is {:?}", self.state),
            ))
        }
    }
}

/// Absolute form of an endpoint address, with no trailing slash
///
/// Relative addresses are resolved beneath `base`, even when they start with
/// a slash.
pub fn normalize_address(base: &str, address: &str) -> Result<String> {
    let url = if is_absolute(address) {
        normalize_endpoint(None, address)?
    } else {
        normalize_endpoint(Some(&normalize_base(base)?), address)?
    };
    Ok(url.into())
}

fn is_absolute(address: &str) -> bool {
    address.contains("://")
}

fn normalize_base(address: &str) -> Result<Url> {
    let mut url = Url::parse(address).map_err(|e| {
        Error::configuration_with_source(format!("Invalid base address '{address}'"), e)
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn normalize_endpoint(base: Option<&Url>, address: &str) -> Result<Url> {
    let parsed = match base {
        Some(base) => base.join(address.trim_start_matches('/')),
        None => Url::parse(address),
    };
    let mut url = parsed.map_err(|e| {
        Error::configuration_with_source(format!("Invalid endpoint address '{address}'"), e)
    })?;
    if url.path().len() > 1 && url.path().ends_with('/') {
        let path = url.path().trim_end_matches('/').to_string();
        url.set_path(&path);
    }
    Ok(url)
}
