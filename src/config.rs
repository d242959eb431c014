//! Configuration module for Wallet Sentry
//!
//! Loaded once from the environment at startup and never mutated.
//! Validation failures here are fatal: the audit loop never starts on a
//! malformed address or endpoint.

use alloy_primitives::Address;
use std::str::FromStr;
use std::time::Duration;

use crate::models::errors::{AppError, AppResult, ErrorCode};

/// Default node endpoint (placeholder project id, override via ETH_RPC_URL)
pub const DEFAULT_RPC_URL: &str = "https://mainnet.infura.io/v3/YOUR_PROJECT_ID";

/// Default wallet to audit, override via WALLET_ADDRESS
pub const DEFAULT_WALLET_ADDRESS: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";

/// Default check list, in execution order, override via AUDIT_CHECKS
pub const DEFAULT_CHECKS: &str =
    "insufficient-liquidity,unverified-contracts,unsecured-ERC20-tokens";

/// Default timeout for RPC requests (seconds)
const DEFAULT_RPC_TIMEOUT_SECS: u64 = 10;

/// Default cap on enumerated transfers per check
const DEFAULT_MAX_RECENT_TRANSFERS: usize = 50;

/// Configuration for one audit run
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// HTTP JSON-RPC endpoint of the node
    pub rpc_url: String,
    /// Wallet address to audit
    pub wallet: Address,
    /// Ordered check names to run. Kept as raw strings so unrecognized
    /// names reach the dispatcher and get logged there.
    pub checks: Vec<String>,
    /// Timeout for each RPC call
    pub rpc_timeout: Duration,
    /// Cap on transfers enumerated per check
    pub max_recent_transfers: usize,
}

impl AuditConfig {
    /// Load configuration from the environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_values(
            std::env::var("ETH_RPC_URL").ok(),
            std::env::var("WALLET_ADDRESS").ok(),
            std::env::var("AUDIT_CHECKS").ok(),
            std::env::var("RPC_TIMEOUT_SECS").ok(),
            std::env::var("MAX_RECENT_TRANSFERS").ok(),
        )
    }

    fn from_values(
        rpc_url: Option<String>,
        wallet: Option<String>,
        checks: Option<String>,
        timeout_secs: Option<String>,
        max_transfers: Option<String>,
    ) -> AppResult<Self> {
        let rpc_url = rpc_url.unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        if rpc_url.trim().is_empty() {
            return Err(AppError::new(ErrorCode::ConfigMissingEnv, "ETH_RPC_URL is empty"));
        }

        let wallet_raw = wallet.unwrap_or_else(|| DEFAULT_WALLET_ADDRESS.to_string());
        let wallet = Address::from_str(wallet_raw.trim()).map_err(|e| {
            AppError::invalid_address(format!("Bad wallet address {:?}: {}", wallet_raw, e))
        })?;

        let checks = parse_check_list(&checks.unwrap_or_else(|| DEFAULT_CHECKS.to_string()));

        let rpc_timeout_secs = match timeout_secs {
            None => DEFAULT_RPC_TIMEOUT_SECS,
            Some(raw) => raw.trim().parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                AppError::invalid_config(format!("Bad RPC_TIMEOUT_SECS: {:?}", raw))
            })?,
        };

        let max_recent_transfers = match max_transfers {
            None => DEFAULT_MAX_RECENT_TRANSFERS,
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                AppError::invalid_config(format!("Bad MAX_RECENT_TRANSFERS: {:?}", raw))
            })?,
        };

        Ok(Self {
            rpc_url,
            wallet,
            checks,
            rpc_timeout: Duration::from_secs(rpc_timeout_secs),
            max_recent_transfers,
        })
    }
}

/// Split a comma-separated check list, dropping empty segments
fn parse_check_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
