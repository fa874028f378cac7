//! Dispatch behavior wiring composed instance providers into a host

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use partwire_application::CompositionContainer;
use partwire_domain::error::{Error, Result};
use partwire_domain::{InstanceProvider, ServiceObject, TypeInfo};
use tracing::debug;

use crate::host::{ChannelDispatcher, ServiceBehavior, ServiceDescription};
use crate::instance_provider::ComposedInstanceProvider;

/// Installs a [`ComposedInstanceProvider<T>`] on every non-metadata endpoint
pub struct ComposedServiceBehavior<T> {
    container: CompositionContainer,
    _service: PhantomData<fn() -> T>,
}

impl<T: ServiceObject> ComposedServiceBehavior<T> {
    pub fn new(container: CompositionContainer) -> Self {
        Self {
            container,
            _service: PhantomData,
        }
    }
}

impl<T: ServiceObject> ServiceBehavior for ComposedServiceBehavior<T> {
    fn validate(&self, description: &ServiceDescription) -> Result<()> {
        let expected = TypeInfo::of::<T>();
        if description.service_type() == expected {
            Ok(())
        } else {
            Err(Error::configuration(format!(
                "Behavior for {expected} cannot be applied to a host of {}",
                description.service_type()
            )))
        }
    }

    fn apply_dispatch_behavior(
        &self,
        _description: &ServiceDescription,
        channel_dispatchers: &mut [ChannelDispatcher],
    ) {
        let provider: Arc<dyn InstanceProvider> =
            Arc::new(ComposedInstanceProvider::<T>::new(self.container.clone()));

        for channel in channel_dispatchers.iter_mut() {
            for endpoint in channel.endpoints_mut() {
                if endpoint.is_metadata() {
                    continue;
                }
                endpoint
                    .runtime_mut()
                    .set_instance_provider(Arc::clone(&provider));
                debug!(address = endpoint.address(), "composed instance provider installed");
            }
        }
    }
}

impl<T> fmt::Debug for ComposedServiceBehavior<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposedServiceBehavior")
            .field("service", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}
