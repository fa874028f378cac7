//! JSON-RPC transport
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`http`] | Rocket server dispatching `POST /<address>` into a [`ServiceHost`](crate::host::ServiceHost) |
//! | [`http_client`] | reqwest client calling a remote host |
//! | [`types`] | JSON-RPC request and response payloads |

pub mod http;
pub mod http_client;
pub mod types;

pub use http::{HttpTransport, HttpTransportConfig, fault_code};
pub use http_client::ServiceClient;
pub use types::{RpcError, RpcRequest, RpcResponse};
