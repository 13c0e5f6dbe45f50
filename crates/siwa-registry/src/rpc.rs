//! JSON-RPC registry resolver.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use siwa_core::traits::{RegistryResolver, ResolverError};
use siwa_crypto::to_checksum_address;

/// ERC-721 `ownerOf(uint256)` function selector
const OWNER_OF_SELECTOR: &str = "6352211e";

/// Registry resolver backed by an Ethereum JSON-RPC node
pub struct RpcRegistryResolver {
    http_client: Client,
    rpc_url: String,
}

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    params: serde_json::Value,
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<String>,
    error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

impl RpcRegistryResolver {
    /// Create a resolver against a JSON-RPC endpoint URL
    pub fn new(rpc_url: impl Into<String>) -> Self {
        RpcRegistryResolver {
            http_client: Client::new(),
            rpc_url: rpc_url.into(),
        }
    }

    /// Create a resolver with a caller-configured HTTP client
    ///
    /// Use this to supply timeouts or connection policy; the resolver adds
    /// none of its own.
    pub fn with_client(rpc_url: impl Into<String>, http_client: Client) -> Self {
        RpcRegistryResolver {
            http_client,
            rpc_url: rpc_url.into(),
        }
    }

    async fn call(&self, method: &str, params: serde_json::Value) -> Result<String, ResolverError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ResolverError::Rpc(format!("{} request failed: {}", method, e)))?;

        if !response.status().is_success() {
            return Err(ResolverError::Rpc(format!(
                "{} failed with status {}",
                method,
                response.status()
            )));
        }

        let body: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| ResolverError::InvalidResponse(e.to_string()))?;

        if let Some(error) = body.error {
            // Reverts surface as node-level errors; for ownerOf that means
            // the token does not exist
            debug!(method, code = error.code, message = %error.message, "node returned error");
            return Err(ResolverError::NotRegistered);
        }

        body.result
            .ok_or_else(|| ResolverError::InvalidResponse("missing result".to_string()))
    }
}

#[async_trait]
impl RegistryResolver for RpcRegistryResolver {
    async fn owner_of(
        &self,
        registry_address: &str,
        agent_id: u64,
    ) -> Result<String, ResolverError> {
        let call = json!({
            "to": registry_address,
            "data": encode_owner_of(agent_id),
        });

        let result = self.call("eth_call", json!([call, "latest"])).await?;
        let owner = decode_owner(&result)?;

        debug!(registry = %registry_address, agent_id, owner = %owner, "resolved agent owner");
        Ok(owner)
    }

    async fn has_code(&self, address: &str) -> Result<bool, ResolverError> {
        let result = self
            .call("eth_getCode", json!([address, "latest"]))
            .await
            .map_err(|e| {
                warn!(address = %address, error = %e, "eth_getCode failed");
                e
            })?;

        Ok(result.len() > 2)
    }
}

/// ABI-encode the `ownerOf(uint256)` call data
fn encode_owner_of(agent_id: u64) -> String {
    format!("0x{}{:064x}", OWNER_OF_SELECTOR, agent_id)
}

/// Decode the address word returned by `ownerOf`
fn decode_owner(result: &str) -> Result<String, ResolverError> {
    let stripped = result.strip_prefix("0x").unwrap_or(result);

    // An empty return means the call hit an address with no contract
    if stripped.is_empty() {
        return Err(ResolverError::NotRegistered);
    }
    if stripped.len() != 64 {
        return Err(ResolverError::InvalidResponse(format!(
            "expected 32-byte word, got {} hex chars",
            stripped.len()
        )));
    }

    let address_hex = &stripped[24..];
    if address_hex.chars().all(|c| c == '0') {
        // The zero address is not a valid owner
        return Err(ResolverError::NotRegistered);
    }

    to_checksum_address(address_hex).map_err(|e| ResolverError::InvalidResponse(e.to_string()))
}
