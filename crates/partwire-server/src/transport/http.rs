//! HTTP transport for hosted services
//!
//! Serves opened [`ServiceHost`]s over JSON-RPC. The request path is resolved
//! against the transport's base address and routed to the host owning that
//! endpoint.
//!
//! ```text
//! POST /greeting HTTP/1.1
//! Content-Type: application/json
//!
//! {"jsonrpc": "2.0", "method": "Greet", "params": {"name": "Ada"}, "id": 1}
//! ```
//!
//! `GET /health` reports every host's state and endpoints.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use partwire_domain::error::{DispatchFault, Error};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::serde::json::Json;
use rocket::{Build, Request, Response, Rocket, State, get, post, routes};
use serde_json::{Value, json};
use tracing::{error, info, warn};

use super::types::{RpcRequest, RpcResponse};
use crate::constants::{
    JSONRPC_INTERNAL_ERROR, JSONRPC_INVALID_PARAMS, JSONRPC_INVALID_REQUEST,
    JSONRPC_METHOD_NOT_FOUND, JSONRPC_VERSION,
};
use crate::host::{ServiceHost, normalize_address};

/// HTTP transport configuration
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS for browser access
    pub enable_cors: bool,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            enable_cors: true,
        }
    }
}

impl HttpTransportConfig {
    /// Create config for localhost with specified port
    pub fn localhost(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], self.port)))
    }

    /// Base address hosts served by this transport should listen under
    pub fn base_address(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }
}

/// Shared state for the HTTP transport
#[derive(Clone)]
pub struct HttpTransportState {
    /// Address request paths are resolved against
    pub base_address: String,
    /// Opened hosts, searched in order for the addressed endpoint
    pub hosts: Arc<Vec<Arc<ServiceHost>>>,
}

impl HttpTransportState {
    fn host_for(&self, address: &str) -> Option<&Arc<ServiceHost>> {
        self.hosts.iter().find(|host| host.has_endpoint(address))
    }
}

/// HTTP transport server
pub struct HttpTransport {
    config: HttpTransportConfig,
    state: HttpTransportState,
}

impl HttpTransport {
    /// Serve `hosts`, which should already be open
    pub fn new<I>(config: HttpTransportConfig, hosts: I) -> Self
    where
        I: IntoIterator<Item = Arc<ServiceHost>>,
    {
        let base_address = config.base_address();
        Self {
            config,
            state: HttpTransportState {
                base_address,
                hosts: Arc::new(hosts.into_iter().collect()),
            },
        }
    }

    /// Build the Rocket application
    pub fn rocket(&self) -> Rocket<Build> {
        let mut rocket = rocket::build()
            .manage(self.state.clone())
            .mount("/", routes![handle_call, handle_health]);

        if self.config.enable_cors {
            rocket = rocket.attach(Cors);
        }

        rocket
    }

    /// The Rocket application bound to the configured address and port
    pub fn configured(&self) -> Rocket<Build> {
        let figment = rocket::Config::figment()
            .merge(("address", self.config.host.clone()))
            .merge(("port", self.config.port));
        self.rocket().configure(figment)
    }

    /// Start the HTTP transport server
    pub async fn start(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.config.socket_addr();
        info!("HTTP transport listening on {}", addr);

        self.configured()
            .launch()
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

        Ok(())
    }
}

/// CORS Fairing for Rocket
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "CORS Headers",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

/// JSON-RPC error code for a dispatch or composition failure
pub fn fault_code(err: &Error) -> i32 {
    match err.dispatch_fault() {
        Some(DispatchFault::EndpointNotFound | DispatchFault::UnknownOperation) => {
            JSONRPC_METHOD_NOT_FOUND
        }
        Some(DispatchFault::InvalidArguments) => JSONRPC_INVALID_PARAMS,
        _ => JSONRPC_INTERNAL_ERROR,
    }
}

/// Dispatch a call to the endpoint at the request path
///
/// Instance resolution and the operation itself run on the blocking pool.
#[post("/<path..>", format = "json", data = "<request>")]
async fn handle_call(
    state: &State<HttpTransportState>,
    path: PathBuf,
    request: Json<RpcRequest>,
) -> Json<RpcResponse> {
    let mut request = request.into_inner();
    if request.jsonrpc != JSONRPC_VERSION {
        return Json(RpcResponse::error(
            request.id,
            JSONRPC_INVALID_REQUEST,
            format!("Unsupported JSON-RPC version: {}", request.jsonrpc),
        ));
    }

    let relative = path
        .iter()
        .map(|segment| segment.to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let outcome = match normalize_address(&state.base_address, &relative) {
        Ok(address) => match state.host_for(&address) {
            Some(host) => {
                let host = Arc::clone(host);
                let method = request.method.clone();
                let params = request.params.take().unwrap_or(Value::Null);
                tokio::task::spawn_blocking(move || host.dispatch(&address, &method, params))
                    .await
                    .unwrap_or_else(|e| Err(Error::internal(format!("Dispatch task failed: {e}"))))
            }
            None => Err(Error::dispatch(
                DispatchFault::EndpointNotFound,
                format!("No endpoint listens on '{address}'"),
            )),
        },
        Err(err) => Err(err),
    };

    let response = match outcome {
        Ok(result) => RpcResponse::success(request.id, result),
        Err(err) => {
            let code = fault_code(&err);
            if code == JSONRPC_INTERNAL_ERROR {
                error!(method = %request.method, error = %err, "call failed");
            } else {
                warn!(method = %request.method, error = %err, "call rejected");
            }
            RpcResponse::error(request.id, code, err.to_string())
        }
    };
    Json(response)
}

#[get("/health")]
fn handle_health(state: &State<HttpTransportState>) -> Json<Value> {
    let hosts: Vec<Value> = state
        .hosts
        .iter()
        .map(|host| {
            json!({
                "state": host.state(),
                "service": host.description().service_type().name(),
                "endpoints": host
                    .description()
                    .endpoints()
                    .iter()
                    .map(|endpoint| endpoint.address.as_str())
                    .collect::<Vec<_>>(),
            })
        })
        .collect();
    Json(json!({ "hosts": hosts }))
}
