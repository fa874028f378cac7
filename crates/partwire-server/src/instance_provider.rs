//! Instance providers
//!
//! [`ComposedInstanceProvider`] resolves a fresh service object from a
//! composition container for every call. [`SingletonInstanceProvider`]
//! hands out one well-known instance.

use std::fmt;
use std::marker::PhantomData;

use partwire_application::CompositionContainer;
use partwire_domain::error::Result;
use partwire_domain::{InstanceProvider, ServiceInstance, ServiceObject, TypeInfo};
use partwire_infrastructure::logging::log_error_chain;
use tracing::{debug, error};

/// Supplies instances of `T` resolved from a composition container
pub struct ComposedInstanceProvider<T> {
    container: CompositionContainer,
    _service: PhantomData<fn() -> T>,
}

impl<T: ServiceObject> ComposedInstanceProvider<T> {
    pub fn new(container: CompositionContainer) -> Self {
        Self {
            container,
            _service: PhantomData,
        }
    }

    pub fn container(&self) -> &CompositionContainer {
        &self.container
    }
}

impl<T: ServiceObject> InstanceProvider for ComposedInstanceProvider<T> {
    /// Resolve a new `T`; failures are logged with the catalog and returned as is
    fn get_instance(&self) -> Result<ServiceInstance> {
        match self.container.get_exported_value::<T>() {
            Ok(instance) => {
                debug!(service = TypeInfo::of::<T>().name(), "service instance resolved");
                Ok(ServiceInstance::new(instance))
            }
            Err(err) => {
                log_error_chain(
                    &format!("Could not resolve {}", TypeInfo::of::<T>().name()),
                    &err,
                );
                for part in self.container.parts() {
                    error!(part = %part, "known part");
                }
                Err(err.into())
            }
        }
    }

    fn release_instance(&self, instance: ServiceInstance) {
        if instance.dispose() {
            debug!(service = instance.info().name(), "service instance disposed");
        }
    }
}

impl<T> fmt::Debug for ComposedInstanceProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposedInstanceProvider")
            .field("service", &std::any::type_name::<T>())
            .field("container", &self.container)
            .finish()
    }
}

/// Serves every call with the same instance and never disposes it
#[derive(Debug, Clone)]
pub struct SingletonInstanceProvider {
    instance: ServiceInstance,
}

impl SingletonInstanceProvider {
    pub fn new(instance: ServiceInstance) -> Self {
        Self { instance }
    }
}

impl InstanceProvider for SingletonInstanceProvider {
    fn get_instance(&self) -> Result<ServiceInstance> {
        Ok(self.instance.clone())
    }

    fn release_instance(&self, _instance: ServiceInstance) {}
}
