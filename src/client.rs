//! ENS name-service client
//!
//! Two read operations against the registry/resolver pair: find the resolver
//! for a node, then ask that resolver for the address or a text record.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;
use url::Url;

use crate::abi::{self, ContractUtils};
use crate::config::EnsQrConfig;
use crate::error::{EnsQrError, Result};
use crate::namehash::Node;

/// Registry side of the name service
#[async_trait]
pub trait NameService: Send + Sync {
    type Resolver: ResolverHandle;

    /// Look up the resolver responsible for `node`
    async fn resolver(&self, node: &Node) -> Result<Self::Resolver>;
}

/// Resolver contract answering record queries for a node
#[async_trait]
pub trait ResolverHandle: Send + Sync {
    /// `addr` record, rendered as a `0x` address string
    async fn address(&self, node: &Node) -> Result<String>;

    /// Text record stored under `key`
    async fn text(&self, node: &Node, key: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: (CallParams, &'a str),
}

#[derive(Debug, Serialize)]
struct CallParams {
    to: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Shared JSON-RPC transport issuing read-only `eth_call`s
#[derive(Debug)]
struct RpcTransport {
    http: reqwest::Client,
    endpoint: Url,
    next_id: AtomicU64,
}

impl RpcTransport {
    async fn eth_call(&self, to: &str, data: Vec<u8>) -> Result<Vec<u8>> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method: "eth_call",
            params: (
                CallParams {
                    to: to.to_string(),
                    data: format!("0x{}", hex::encode(data)),
                },
                "latest",
            ),
        };

        debug!("eth_call #{} to {}", id, to);

        let response: JsonRpcResponse = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        into_output(response)
    }
}

/// Unwrap a JSON-RPC response into the raw call output
fn into_output(response: JsonRpcResponse) -> Result<Vec<u8>> {
    if let Some(error) = response.error {
        return Err(EnsQrError::Rpc {
            code: error.code,
            message: error.message,
        });
    }

    let result = response
        .result
        .ok_or_else(|| EnsQrError::Abi("Response has neither result nor error".to_string()))?;
    let hex_str = result.strip_prefix("0x").unwrap_or(&result);
    Ok(hex::decode(hex_str)?)
}

/// Resolver address from `resolver(node)` output; the zero address means none is set
fn resolver_address(node: &Node, output: &[u8]) -> Result<String> {
    let address = ContractUtils::decode_address(output)?;
    if address == [0u8; 20] {
        return Err(EnsQrError::NoResolver(node.to_string()));
    }
    Ok(abi::to_checksum_address(&address))
}

/// Name service backed by an Ethereum JSON-RPC endpoint
#[derive(Debug, Clone)]
pub struct RpcNameService {
    transport: Arc<RpcTransport>,
    registry_address: String,
}

impl RpcNameService {
    /// Build a client from configuration
    pub fn new(config: &EnsQrConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            transport: Arc::new(RpcTransport {
                http,
                endpoint: config.rpc_url.clone(),
                next_id: AtomicU64::new(1),
            }),
            registry_address: config.registry_address.clone(),
        })
    }
}

#[async_trait]
impl NameService for RpcNameService {
    type Resolver = RpcResolver;

    async fn resolver(&self, node: &Node) -> Result<RpcResolver> {
        let output = self
            .transport
            .eth_call(&self.registry_address, ContractUtils::resolver_call(node))
            .await?;
        let resolver = RpcResolver {
            transport: Arc::clone(&self.transport),
            address: resolver_address(node, &output)?,
        };

        debug!("Resolver for {} is {}", node, resolver.contract_address());
        Ok(resolver)
    }
}

/// Resolver contract reached through [`RpcNameService`]
#[derive(Debug, Clone)]
pub struct RpcResolver {
    transport: Arc<RpcTransport>,
    address: String,
}

impl RpcResolver {
    /// Contract address of this resolver
    pub fn contract_address(&self) -> &str {
        &self.address
    }
}

#[async_trait]
impl ResolverHandle for RpcResolver {
    async fn address(&self, node: &Node) -> Result<String> {
        let output = self
            .transport
            .eth_call(&self.address, ContractUtils::addr_call(node))
            .await?;
        let address = ContractUtils::decode_address(&output)?;
        Ok(abi::to_checksum_address(&address))
    }

    async fn text(&self, node: &Node, key: &str) -> Result<String> {
        let output = self
            .transport
            .eth_call(&self.address, ContractUtils::text_call(node, key))
            .await?;
        ContractUtils::decode_string(&output)
    }
}
