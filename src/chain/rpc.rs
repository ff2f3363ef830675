//! Ethereum JSON-RPC over HTTP.
//!
//! Only the two read calls the liquidity driver needs:
//! `eth_blockNumber` and `eth_getTransactionCount`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use super::ChainProvider;

const REQUEST_TIMEOUT_SECS: u64 = 10;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Decode a `0x`-prefixed hex quantity.
pub fn parse_quantity(value: &str) -> Result<u64> {
    let digits = value
        .strip_prefix("0x")
        .with_context(|| format!("Quantity is not 0x-prefixed: {value}"))?;
    u64::from_str_radix(digits, 16).with_context(|| format!("Invalid hex quantity: {value}"))
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct JsonRpcClient {
    http: Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build JSON-RPC HTTP client")?;

        Ok(Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Call `method` and return the raw `result` value.
    async fn call(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        debug!(url = %self.url, method, id = request.id, "JSON-RPC call");

        let resp = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("{method} request to {} failed", self.url))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("JSON-RPC HTTP error {status} ({method}): {body}");
        }

        let body: RpcResponse = resp
            .json()
            .await
            .with_context(|| format!("Failed to parse {method} response"))?;

        if let Some(err) = body.error {
            anyhow::bail!("JSON-RPC error {} ({method}): {}", err.code, err.message);
        }
        body.result
            .with_context(|| format!("{method} response has no result"))
    }

    async fn call_quantity(&self, method: &str, params: serde_json::Value) -> Result<u64> {
        let result = self.call(method, params).await?;
        let hex = result
            .as_str()
            .with_context(|| format!("{method} result is not a string: {result}"))?;
        parse_quantity(hex)
    }
}

#[async_trait]
impl ChainProvider for JsonRpcClient {
    async fn block_number(&self) -> Result<u64> {
        self.call_quantity("eth_blockNumber", serde_json::json!([])).await
    }

    async fn transaction_count(&self, address: &str) -> Result<u64> {
        self.call_quantity("eth_getTransactionCount", serde_json::json!([address, "latest"]))
            .await
    }
}
