//! # partwire server
//!
//! Hosts services whose instances are supplied per call by a composition
//! container.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`host`] | Service host model: description, dispatchers, state machine |
//! | [`instance_provider`] | Composed and singleton instance providers |
//! | [`behavior`] | Dispatch behavior installing composed providers at open |
//! | [`host_factory`] | Per-call and singleton host factories |
//! | [`transport`] | JSON-RPC over HTTP (Rocket) and the reqwest client |
//! | [`init`] | Server and self-host bootstrap for the demo services |
//! | [`constants`] | JSON-RPC codes and transport defaults |
//!
//! ## Flow
//!
//! ```text
//! host.open() ──► ComposedServiceBehavior installs ComposedInstanceProvider<T>
//! POST /<address> ──► host.dispatch ──► provider.get_instance ──► container
//!                                  └──► instance.invoke ──► provider.release_instance
//! ```

pub mod behavior;
pub mod constants;
pub mod host;
pub mod host_factory;
pub mod init;
pub mod instance_provider;
pub mod transport;

pub use behavior::ComposedServiceBehavior;
pub use host::{
    ChannelDispatcher, DispatchRuntime, EndpointDispatcher, HostState, ServiceBehavior,
    ServiceDescription, ServiceEndpoint, ServiceHost,
};
pub use host_factory::{ComposedServiceHostFactory, ComposedSingletonServiceHostFactory};
pub use init::{run_selfhost, run_server};
pub use instance_provider::{ComposedInstanceProvider, SingletonInstanceProvider};
pub use transport::{HttpTransport, HttpTransportConfig, RpcRequest, RpcResponse, ServiceClient};
