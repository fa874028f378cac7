//! Service host model
//!
//! A [`ServiceHost`] owns a [`ServiceDescription`] (service type, behaviors,
//! endpoints) and one [`ChannelDispatcher`] per base address. Each channel
//! dispatcher holds an [`EndpointDispatcher`] per endpoint, whose
//! [`DispatchRuntime`] carries the instance provider used for calls.

mod behavior;
mod description;
mod dispatcher;
mod metadata;
mod service_host;

pub use behavior::ServiceBehavior;
pub use description::{HostState, ServiceDescription, ServiceEndpoint};
pub use dispatcher::{ChannelDispatcher, DispatchRuntime, EndpointDispatcher};
pub use metadata::{MetadataService, metadata_contract};
pub use service_host::{ServiceHost, normalize_address};
