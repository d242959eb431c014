//! Audit pipeline
//!
//! Runs the configured checks against one wallet address, in
//! configuration order, and aggregates the findings. A failing check is
//! logged and skipped; it never aborts the pass.

use alloy_primitives::{Address, U256};
use tracing::{debug, info, warn};

use crate::config::AuditConfig;
use crate::models::errors::AppResult;
use crate::models::types::{CheckId, Finding, Severity};
use crate::providers::chain::{ChainReader, TransferKind};

/// Low-balance threshold: 0.1 ether, compared exactly in wei.
/// The node reports balances in wei; comparing in the same denomination
/// keeps the boundary exact (0.1 ether itself does not trigger).
pub const LOW_BALANCE_THRESHOLD_WEI: u128 = 100_000_000_000_000_000;

/// The audit pipeline: one wallet, one ordered pass over the configured
/// checks, one findings list out
pub struct WalletAuditor<C> {
    config: AuditConfig,
    client: C,
}

impl<C: ChainReader + Send + Sync> WalletAuditor<C> {
    pub fn new(config: AuditConfig, client: C) -> Self {
        Self { config, client }
    }

    /// Wallet address under audit
    pub fn wallet(&self) -> Address {
        self.config.wallet
    }

    /// Run all configured checks in order and collect their findings.
    ///
    /// Connectivity failures inside a check are contained: logged with
    /// the check id, the check yields no finding, and the pass moves on.
    /// Unrecognized check names are logged and skipped. Once this runs,
    /// the caller always receives a (possibly empty) list.
    pub async fn audit_wallet(&self) -> Vec<Finding> {
        // Informational only; the count is a scalar and no check iterates it
        match self.client.get_transaction_count(self.config.wallet).await {
            Ok(count) => info!(
                "Wallet {} has {} outgoing transactions",
                self.config.wallet, count
            ),
            Err(e) => debug!("Could not fetch transaction count: {}", e),
        }

        let mut findings = Vec::new();
        for name in &self.config.checks {
            let Some(check) = CheckId::parse(name) else {
                warn!("Unknown vulnerability check: {}", name);
                continue;
            };

            match self.run_check(check).await {
                Ok(Some(finding)) => findings.push(finding),
                Ok(None) => debug!("{}: no finding", check),
                Err(e) => warn!("Check {} failed, skipping: {}", check, e),
            }
        }
        findings
    }

    async fn run_check(&self, check: CheckId) -> AppResult<Option<Finding>> {
        match check {
            CheckId::InsufficientLiquidity => self.check_insufficient_liquidity().await,
            CheckId::UnverifiedContracts => self.check_unverified_contracts().await,
            CheckId::UnsecuredErc20Tokens => self.check_unsecured_erc20_tokens().await,
        }
    }

    /// Flag wallets whose native balance is below the threshold
    async fn check_insufficient_liquidity(&self) -> AppResult<Option<Finding>> {
        let balance = self.client.get_balance(self.config.wallet).await?;
        debug!("Balance for {}: {} wei", self.config.wallet, balance);

        if balance < U256::from(LOW_BALANCE_THRESHOLD_WEI) {
            return Ok(Some(Finding::new(
                CheckId::InsufficientLiquidity,
                Severity::High,
                "wallet balance is low",
            )));
        }
        Ok(None)
    }

    /// Flag recent counterparties with no deployed bytecode
    async fn check_unverified_contracts(&self) -> AppResult<Option<Finding>> {
        let transfers = self
            .client
            .recent_transactions(self.config.wallet, self.config.max_recent_transfers)
            .await?;

        let mut seen: Vec<Address> = Vec::new();
        let mut missing: Vec<Address> = Vec::new();
        for transfer in &transfers {
            let Some(to) = transfer.to else { continue };
            if seen.contains(&to) {
                continue;
            }
            seen.push(to);

            let code = self.client.get_code(to).await?;
            if code.is_empty() {
                missing.push(to);
            }
        }

        if missing.is_empty() {
            return Ok(None);
        }
        Ok(Some(Finding::new(
            CheckId::UnverifiedContracts,
            Severity::Medium,
            format!("unverified contracts found: {}", join_addresses(&missing)),
        )))
    }

    /// Flag recently transferred ERC-20 tokens whose contract has no code
    async fn check_unsecured_erc20_tokens(&self) -> AppResult<Option<Finding>> {
        let transfers = self
            .client
            .recent_transactions(self.config.wallet, self.config.max_recent_transfers)
            .await?;

        let mut seen: Vec<Address> = Vec::new();
        let mut dead: Vec<Address> = Vec::new();
        for transfer in transfers.iter().filter(|t| t.kind == TransferKind::Erc20) {
            // The token contract is what the probe is about; fall back to
            // the recipient when the node omits it
            let Some(token) = transfer.token_contract.or(transfer.to) else {
                continue;
            };
            if seen.contains(&token) {
                continue;
            }
            seen.push(token);

            let code = self.client.get_code(token).await?;
            if code.is_empty() {
                dead.push(token);
            }
        }

        if dead.is_empty() {
            return Ok(None);
        }
        Ok(Some(Finding::new(
            CheckId::UnsecuredErc20Tokens,
            Severity::Low,
            format!("unsecured ERC20 tokens found: {}", join_addresses(&dead)),
        )))
    }
}

fn join_addresses(addresses: &[Address]) -> String {
    addresses
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
