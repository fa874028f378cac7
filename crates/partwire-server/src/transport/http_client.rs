//! HTTP client for hosted services

use std::time::Duration;

use partwire_domain::error::{Error, Result};
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use super::types::{RpcRequest, RpcResponse};
use crate::constants::DEFAULT_CLIENT_TIMEOUT_SECS;

/// Calls operations on one remote endpoint
#[derive(Debug, Clone)]
pub struct ServiceClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl ServiceClient {
    /// Client for the endpoint at `endpoint`, e.g. `http://127.0.0.1:8080/greeting`
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_CLIENT_TIMEOUT_SECS))
    }

    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            Error::configuration_with_source(format!("Invalid endpoint address '{endpoint}'"), e)
        })?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::network_with_source("Failed to create HTTP client", e))?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Invoke `operation`; a JSON-RPC error becomes [`Error::Fault`]
    pub async fn call(&self, operation: &str, params: Value) -> Result<Value> {
        let request = RpcRequest::new(operation, params, Value::from(1));
        debug!(url = %self.endpoint, method = operation, "Sending request to host");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::network_with_source(format!("Request to {} failed", self.endpoint), e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Host returned non-success status");
            return Err(Error::network(format!(
                "Host returned {status} for {}",
                self.endpoint
            )));
        }

        let response: RpcResponse = response
            .json()
            .await
            .map_err(|e| Error::network_with_source("Malformed JSON-RPC response", e))?;
        match (response.result, response.error) {
            (_, Some(error)) => Err(Error::fault(error.code, error.message)),
            (Some(result), None) => Ok(result),
            (None, None) => Ok(Value::Null),
        }
    }

    /// Fetch `/health` from the endpoint's origin
    pub async fn health(&self) -> Result<Value> {
        let url = self
            .endpoint
            .join("/health")
            .map_err(|e| Error::configuration_with_source("Invalid health address", e))?;
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::network_with_source("Health request failed", e))?
            .json()
            .await
            .map_err(|e| Error::network_with_source("Malformed health response", e))
    }
}
