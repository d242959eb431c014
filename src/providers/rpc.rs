//! JSON-RPC Provider Module
//!
//! Thin HTTP transport for Ethereum-style JSON-RPC nodes.
//! Each call is exactly one round trip: no retries, no fallback
//! endpoints, no batching. The only hardening is a bounded
//! per-request timeout.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::models::errors::{AppError, AppResult};

/// User-Agent for HTTP requests
const USER_AGENT_VALUE: &str = concat!("WalletSentry/", env!("CARGO_PKG_VERSION"));

/// RPC provider bound to a single HTTP endpoint
#[derive(Clone)]
pub struct RpcProvider {
    /// Node endpoint URL
    url: String,
    /// HTTP client with custom headers (gzip enabled)
    client: reqwest::Client,
}

impl RpcProvider {
    /// Create a provider for one endpoint with a bounded per-call timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| {
                AppError::rpc_connection_failed(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Execute one JSON-RPC call and decode the result
    pub async fn call<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> AppResult<T> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        debug!("RPC call: {}", method);

        let response = self.client.post(&self.url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::rpc_error(format!("HTTP error: {}", status)));
        }

        let json: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| AppError::invalid_response(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = json.error {
            return Err(AppError::rpc_error(format!(
                "RPC error: {} (code: {})",
                error.message, error.code
            )));
        }

        json.result
            .ok_or_else(|| AppError::invalid_response("No result in response"))
    }

    /// Get endpoint URL with any API key segment masked, for logging
    pub fn masked_url(&self) -> String {
        if self.url.contains("/v2/") {
            let parts: Vec<&str> = self.url.split("/v2/").collect();
            if parts.len() == 2 {
                return format!("{}/v2/***HIDDEN***", parts[0]);
            }
        }
        if self.url.contains("/v3/") {
            let parts: Vec<&str> = self.url.split("/v3/").collect();
            if parts.len() == 2 {
                return format!("{}/v3/***HIDDEN***", parts[0]);
            }
        }
        self.url.clone()
    }
}

/// JSON-RPC response structure
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    #[allow(dead_code)]
    jsonrpc: String,
    result: Option<T>,
    error: Option<RpcError>,
    #[allow(dead_code)]
    id: u64,
}

/// JSON-RPC error structure
#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}
