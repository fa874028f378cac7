//! Host factories
//!
//! Both factories attach a [`ComposedServiceBehavior`] bound to their
//! container. The singleton factory additionally resolves one instance up
//! front and hosts it for every call.

use std::sync::Arc;

use partwire_application::CompositionContainer;
use partwire_domain::error::Result;
use partwire_domain::{ServiceInstance, ServiceObject, TypeInfo};
use partwire_infrastructure::configured_container;
use tracing::info;

use crate::behavior::ComposedServiceBehavior;
use crate::host::ServiceHost;

/// Creates hosts whose instances are resolved per call
#[derive(Debug, Clone)]
pub struct ComposedServiceHostFactory {
    container: CompositionContainer,
}

impl ComposedServiceHostFactory {
    pub fn new(container: CompositionContainer) -> Self {
        Self { container }
    }

    /// Factory over the process-wide configured container
    pub fn from_configured() -> Result<Self> {
        Ok(Self::new(configured_container()?))
    }

    pub fn container(&self) -> &CompositionContainer {
        &self.container
    }

    pub fn create_service_host<T, I, S>(&self, base_addresses: I) -> Result<ServiceHost>
    where
        T: ServiceObject,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut host = ServiceHost::new(TypeInfo::of::<T>(), base_addresses)?;
        host.add_behavior(Arc::new(ComposedServiceBehavior::<T>::new(self.container.clone())))?;
        info!(service = TypeInfo::of::<T>().name(), "service host created");
        Ok(host)
    }
}

/// Creates hosts serving one instance resolved at creation time
#[derive(Debug, Clone)]
pub struct ComposedSingletonServiceHostFactory {
    container: CompositionContainer,
}

impl ComposedSingletonServiceHostFactory {
    pub fn new(container: CompositionContainer) -> Self {
        Self { container }
    }

    pub fn from_configured() -> Result<Self> {
        Ok(Self::new(configured_container()?))
    }

    pub fn container(&self) -> &CompositionContainer {
        &self.container
    }

    pub fn create_service_host<T, I, S>(&self, base_addresses: I) -> Result<ServiceHost>
    where
        T: ServiceObject,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let instance = self.container.get_exported_value::<T>()?;
        let mut host = ServiceHost::new(TypeInfo::of::<T>(), base_addresses)?
            .with_singleton(ServiceInstance::new(instance));
        host.add_behavior(Arc::new(ComposedServiceBehavior::<T>::new(self.container.clone())))?;
        info!(service = TypeInfo::of::<T>().name(), "singleton service host created");
        Ok(host)
    }
}
