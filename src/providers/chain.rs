//! Chain Client Module
//!
//! Read-only access to on-chain state for one address at a time:
//! native balance, outgoing-transaction count, deployed bytecode, and
//! recent outgoing transfers via the Transfers API
//! (alchemy_getAssetTransfers).
//!
//! The `ChainReader` trait is the seam between the audit pipeline and
//! the node; `ChainClient` is the one concrete implementation.

use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

use crate::models::errors::{AppError, AppResult};
use crate::providers::rpc::RpcProvider;

/// Read-only chain queries the audit pipeline depends on
#[async_trait]
pub trait ChainReader {
    /// Native balance in wei
    async fn get_balance(&self, address: Address) -> AppResult<U256>;

    /// Outgoing-transaction count. A scalar, never a collection;
    /// per-transaction details come from `recent_transactions`.
    async fn get_transaction_count(&self, address: Address) -> AppResult<u64>;

    /// Deployed bytecode; empty for addresses with no contract
    async fn get_code(&self, address: Address) -> AppResult<Bytes>;

    /// Recent outgoing transfers (native + ERC-20), newest-first as the
    /// node returns them, capped at `max` entries
    async fn recent_transactions(
        &self,
        address: Address,
        max: usize,
    ) -> AppResult<Vec<OutgoingTransfer>>;
}

/// Transfer category, as reported by the Transfers API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    /// Plain native-token transaction
    External,
    /// ERC-20 token transfer
    Erc20,
    /// Anything else the node reports
    Other,
}

impl TransferKind {
    fn from_category(category: &str) -> Self {
        match category {
            "external" => TransferKind::External,
            "erc20" => TransferKind::Erc20,
            _ => TransferKind::Other,
        }
    }
}

/// One enumerated historical transfer out of the wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingTransfer {
    /// Destination address, when the node reports one
    pub to: Option<Address>,
    /// Token contract behind an ERC-20 transfer
    pub token_contract: Option<Address>,
    /// Transfer category
    pub kind: TransferKind,
}

/// Chain client bound to a single JSON-RPC endpoint
#[derive(Clone)]
pub struct ChainClient {
    provider: RpcProvider,
}

impl ChainClient {
    /// Create a client for one endpoint with a bounded per-call timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        Ok(Self {
            provider: RpcProvider::new(url, timeout)?,
        })
    }

    /// Endpoint URL with any API key segment masked, for logging
    pub fn masked_url(&self) -> String {
        self.provider.masked_url()
    }
}

#[async_trait]
impl ChainReader for ChainClient {
    async fn get_balance(&self, address: Address) -> AppResult<U256> {
        let params = serde_json::json!([address.to_string(), "latest"]);
        let raw: String = self.provider.call("eth_getBalance", params).await?;
        parse_quantity_u256(&raw)
    }

    async fn get_transaction_count(&self, address: Address) -> AppResult<u64> {
        let params = serde_json::json!([address.to_string(), "latest"]);
        let raw: String = self.provider.call("eth_getTransactionCount", params).await?;
        parse_quantity_u64(&raw)
    }

    async fn get_code(&self, address: Address) -> AppResult<Bytes> {
        let params = serde_json::json!([address.to_string(), "latest"]);
        let raw: String = self.provider.call("eth_getCode", params).await?;
        Bytes::from_str(&raw)
            .map_err(|e| AppError::invalid_response(format!("Bad bytecode hex: {}", e)))
    }

    async fn recent_transactions(
        &self,
        address: Address,
        max: usize,
    ) -> AppResult<Vec<OutgoingTransfer>> {
        // maxCount is a hex quantity per the Transfers API
        let params = serde_json::json!([{
            "fromAddress": address.to_string(),
            "toBlock": "latest",
            "category": ["external", "erc20"],
            "maxCount": format!("{:#x}", max.max(1)),
        }]);

        let response: AssetTransfersResponse = self
            .provider
            .call("alchemy_getAssetTransfers", params)
            .await?;

        Ok(response
            .transfers
            .into_iter()
            .take(max)
            .map(OutgoingTransfer::from)
            .collect())
    }
}

// ============================================
// Transfers API wire types
// ============================================

/// Response from alchemy_getAssetTransfers
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetTransfersResponse {
    transfers: Vec<AssetTransfer>,
    #[allow(dead_code)]
    page_key: Option<String>,
}

/// Asset transfer entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetTransfer {
    to: Option<String>,
    category: String,
    raw_contract: Option<RawContract>,
}

/// Raw contract info in transfer
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContract {
    address: Option<String>,
}

impl From<AssetTransfer> for OutgoingTransfer {
    fn from(wire: AssetTransfer) -> Self {
        let to = wire.to.as_deref().and_then(|s| Address::from_str(s).ok());
        let token_contract = wire
            .raw_contract
            .as_ref()
            .and_then(|c| c.address.as_deref())
            .and_then(|s| Address::from_str(s).ok());

        Self {
            to,
            token_contract,
            kind: TransferKind::from_category(&wire.category),
        }
    }
}

// ============================================
// Quantity decoding
// ============================================

fn parse_quantity_u256(raw: &str) -> AppResult<U256> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    U256::from_str_radix(digits, 16)
        .map_err(|e| AppError::invalid_response(format!("Bad quantity {:?}: {}", raw, e)))
}

fn parse_quantity_u64(raw: &str) -> AppResult<u64> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    u64::from_str_radix(digits, 16)
        .map_err(|e| AppError::invalid_response(format!("Bad quantity {:?}: {}", raw, e)))
}
