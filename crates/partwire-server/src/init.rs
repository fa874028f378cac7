//! Server Initialization
//!
//! Bootstraps the demo services: configuration, logging, the configured
//! composition container and the hosts served over HTTP.
//!
//! | Entry point | Container | Hosts |
//! |-------------|-----------|-------|
//! | [`run_server`] | configured (`[composition]` section) | `data/` (`MyService`), `greeting/` (`GreetingService`) |
//! | [`run_selfhost`] | explicit `MyService` + `SomeDependency` | `selfhost/percall`, called twice over HTTP |

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use partwire_application::CompositionContainer;
use partwire_application::registry::{RegisteredTypeSet, find_part};
use partwire_domain::error::{Error, Result};
use partwire_infrastructure::logging::init_logging;
use partwire_infrastructure::{AppConfig, ConfigLoader, create_container, init_configured_container};
use partwire_providers::contracts::{greeting_contract, service_contract};
use partwire_providers::services::{GreetingService, MyService};
use serde_json::json;
use tracing::{debug, info};

use crate::behavior::ComposedServiceBehavior;
use crate::constants::{
    DATA_SERVICE_PATH, GREETING_SERVICE_PATH, READY_POLL_ATTEMPTS, READY_POLL_INTERVAL_MS,
    SELFHOST_ENDPOINT_ADDRESS, SELFHOST_SERVICE_PATH,
};
use crate::host::ServiceHost;
use crate::host_factory::ComposedServiceHostFactory;
use crate::transport::{HttpTransport, HttpTransportConfig, ServiceClient};

/// Parts composed by the self-hosted service
const SELFHOST_PARTS: [&str; 2] = [
    "partwire_providers::services::MyService",
    "partwire_providers::dependencies::SomeDependency",
];

/// Load configuration from an optional path
pub fn load_config(config_path: Option<&Path>) -> Result<AppConfig> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    loader.load()
}

/// Transport settings for the configured server section
pub fn transport_config(config: &AppConfig) -> HttpTransportConfig {
    HttpTransportConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        enable_cors: true,
    }
}

/// Opened hosts for the data and greeting services under `base_address`
pub fn demo_hosts(
    factory: &ComposedServiceHostFactory,
    base_address: &str,
) -> Result<Vec<ServiceHost>> {
    let mut data = factory
        .create_service_host::<MyService, _, _>([format!("{base_address}{DATA_SERVICE_PATH}/")])?;
    data.add_service_endpoint(service_contract(), "")?;
    data.add_metadata_endpoint()?;
    data.open()?;

    let mut greeting = factory.create_service_host::<GreetingService, _, _>([format!(
        "{base_address}{GREETING_SERVICE_PATH}/"
    )])?;
    greeting.add_service_endpoint(greeting_contract(), "")?;
    greeting.add_metadata_endpoint()?;
    greeting.open()?;

    Ok(vec![data, greeting])
}

/// Run the configured server until it is shut down
pub async fn run_server(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    init_logging(&config.logging)?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        "Starting partwire server"
    );

    let container = init_configured_container(&config)?;
    let transport_config = transport_config(&config);
    let hosts = demo_hosts(
        &ComposedServiceHostFactory::new(container),
        &transport_config.base_address(),
    )?;
    info!(hosts = hosts.len(), "service hosts opened");

    HttpTransport::new(transport_config, hosts.into_iter().map(Arc::new))
        .start()
        .await
        .map_err(|e| Error::network(format!("HTTP transport failed: {e}")))
}

/// Container over the self-hosted parts only
pub fn selfhost_container() -> Result<CompositionContainer> {
    let mut types = RegisteredTypeSet::new();
    for type_name in SELFHOST_PARTS {
        let entry = find_part(type_name, None)
            .ok_or_else(|| Error::type_load(format!("Part {type_name} is not registered")))?;
        types.insert(entry);
    }
    Ok(create_container(&types))
}

/// Opened host serving `MyService` at `selfhost/percall`
pub fn selfhost_host(container: CompositionContainer, base_address: &str) -> Result<ServiceHost> {
    let mut host = ServiceHost::new(
        partwire_domain::TypeInfo::of::<MyService>(),
        [format!("{base_address}{SELFHOST_SERVICE_PATH}")],
    )?;
    host.add_service_endpoint(service_contract(), SELFHOST_ENDPOINT_ADDRESS)?;
    host.add_behavior(Arc::new(ComposedServiceBehavior::<MyService>::new(container)))?;
    host.open()?;
    Ok(host)
}

/// Host `MyService`, call `GetData` for each value over HTTP and stop
///
/// Returns the responses in call order.
pub async fn run_selfhost(config_path: Option<&Path>, values: &[i32]) -> Result<Vec<String>> {
    let config = load_config(config_path)?;
    init_logging(&config.logging)?;

    let transport_config = transport_config(&config);
    let base_address = transport_config.base_address();
    let host = selfhost_host(selfhost_container()?, &base_address)?;
    let endpoint = format!("{base_address}{SELFHOST_SERVICE_PATH}/{SELFHOST_ENDPOINT_ADDRESS}");

    let rocket = HttpTransport::new(transport_config, [Arc::new(host)])
        .configured()
        .ignite()
        .await
        .map_err(|e| Error::network(format!("Failed to start the self-hosted transport: {e}")))?;
    let shutdown = rocket.shutdown();
    let server = tokio::spawn(rocket.launch());

    let client = ServiceClient::new(&endpoint)?;
    let outcome = call_when_ready(&client, values).await;

    shutdown.notify();
    if let Err(e) = server.await {
        debug!(error = %e, "self-hosted transport task ended abnormally");
    }
    outcome
}

async fn call_when_ready(client: &ServiceClient, values: &[i32]) -> Result<Vec<String>> {
    let mut ready = client.health().await;
    for _ in 1..READY_POLL_ATTEMPTS {
        if ready.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(READY_POLL_INTERVAL_MS)).await;
        ready = client.health().await;
    }
    ready?;

    let mut responses = Vec::with_capacity(values.len());
    for value in values {
        let result = client.call("GetData", json!({ "value": value })).await?;
        responses.push(result.as_str().map_or_else(|| result.to_string(), str::to_string));
    }
    Ok(responses)
}
