//! Integration tests for the wallet audit pipeline

use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use std::str::FromStr;
use std::time::Duration;

use wallet_sentry::{
    AppError, AppResult, AuditConfig, ChainReader, CheckId, OutgoingTransfer, Severity,
    TransferKind, WalletAuditor,
};

const WALLET: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";
const TOKEN: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
const COUNTERPARTY: &str = "0x7a250d5630b4cf539739df2c5dacb4c659f2488d";

const ONE_ETH_WEI: u128 = 1_000_000_000_000_000_000;
const POINT_ONE_ETH_WEI: u128 = 100_000_000_000_000_000;

fn addr(s: &str) -> Address {
    Address::from_str(s).unwrap()
}

fn test_config(checks: &[&str]) -> AuditConfig {
    AuditConfig {
        rpc_url: "http://localhost:8545".to_string(),
        wallet: addr(WALLET),
        checks: checks.iter().map(|s| s.to_string()).collect(),
        rpc_timeout: Duration::from_secs(5),
        max_recent_transfers: 50,
    }
}

/// Fixed-value chain stub. `balance: None` simulates a node failure on
/// the balance query; `transfers: None` does the same for enumeration.
#[derive(Clone)]
struct StubChain {
    balance: Option<U256>,
    transfers: Option<Vec<OutgoingTransfer>>,
    /// Addresses that have deployed bytecode
    coded: Vec<Address>,
}

impl StubChain {
    fn healthy() -> Self {
        Self {
            balance: Some(U256::from(ONE_ETH_WEI)),
            transfers: Some(Vec::new()),
            coded: Vec::new(),
        }
    }
}

#[async_trait]
impl ChainReader for StubChain {
    async fn get_balance(&self, _address: Address) -> AppResult<U256> {
        self.balance
            .ok_or_else(|| AppError::rpc_connection_failed("stub: node down"))
    }

    async fn get_transaction_count(&self, _address: Address) -> AppResult<u64> {
        Ok(self
            .transfers
            .as_ref()
            .map(|t| t.len() as u64)
            .unwrap_or(0))
    }

    async fn get_code(&self, address: Address) -> AppResult<Bytes> {
        if self.coded.contains(&address) {
            Ok(Bytes::from(vec![0x60, 0x80, 0x60, 0x40]))
        } else {
            Ok(Bytes::new())
        }
    }

    async fn recent_transactions(
        &self,
        _address: Address,
        max: usize,
    ) -> AppResult<Vec<OutgoingTransfer>> {
        match &self.transfers {
            Some(t) => Ok(t.iter().take(max).cloned().collect()),
            None => Err(AppError::rpc_timeout("stub: transfers unavailable")),
        }
    }
}

fn erc20_transfer(token: &str) -> OutgoingTransfer {
    OutgoingTransfer {
        to: Some(addr(COUNTERPARTY)),
        token_contract: Some(addr(token)),
        kind: TransferKind::Erc20,
    }
}

fn external_transfer(to: &str) -> OutgoingTransfer {
    OutgoingTransfer {
        to: Some(addr(to)),
        token_contract: None,
        kind: TransferKind::External,
    }
}

#[tokio::test]
async fn test_empty_check_list_yields_empty_findings() {
    let auditor = WalletAuditor::new(test_config(&[]), StubChain::healthy());
    assert_eq!(auditor.wallet(), addr(WALLET));
    let findings = auditor.audit_wallet().await;
    assert!(findings.is_empty(), "No checks configured, no findings");
}

#[tokio::test]
async fn test_unknown_checks_are_skipped() {
    let config = test_config(&["reentrancy", "flash-loan-exposure"]);
    let auditor = WalletAuditor::new(config, StubChain::healthy());
    let findings = auditor.audit_wallet().await;
    assert!(findings.is_empty(), "Unknown names are logged, not reported");
}

#[tokio::test]
async fn test_findings_preserve_configured_order() {
    let mut chain = StubChain::healthy();
    chain.balance = Some(U256::ZERO); // triggers insufficient-liquidity
    chain.transfers = Some(vec![erc20_transfer(TOKEN)]); // token has no code

    let config = test_config(&["unsecured-ERC20-tokens", "insufficient-liquidity"]);
    let auditor = WalletAuditor::new(config, chain);
    let findings = auditor.audit_wallet().await;

    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].check, CheckId::UnsecuredErc20Tokens);
    assert_eq!(findings[1].check, CheckId::InsufficientLiquidity);
}

#[tokio::test]
async fn test_audit_is_idempotent() {
    let mut chain = StubChain::healthy();
    chain.balance = Some(U256::ZERO);
    chain.transfers = Some(vec![erc20_transfer(TOKEN), external_transfer(COUNTERPARTY)]);

    let config = test_config(&[
        "insufficient-liquidity",
        "unverified-contracts",
        "unsecured-ERC20-tokens",
    ]);
    let auditor = WalletAuditor::new(config, chain);

    let first = auditor.audit_wallet().await;
    let second = auditor.audit_wallet().await;
    assert_eq!(first, second, "Fixed inputs must produce identical reports");
}

#[tokio::test]
async fn test_liquidity_threshold_boundary() {
    // Exactly 0.1 ether: no finding
    let mut chain = StubChain::healthy();
    chain.balance = Some(U256::from(POINT_ONE_ETH_WEI));
    let auditor = WalletAuditor::new(test_config(&["insufficient-liquidity"]), chain);
    assert!(auditor.audit_wallet().await.is_empty());

    // 0.099999 ether: finding
    let mut chain = StubChain::healthy();
    chain.balance = Some(U256::from(99_999_000_000_000_000u128));
    let auditor = WalletAuditor::new(test_config(&["insufficient-liquidity"]), chain);
    let findings = auditor.audit_wallet().await;
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].check, CheckId::InsufficientLiquidity);
    assert_eq!(findings[0].severity, Severity::High);
}

#[tokio::test]
async fn test_failing_check_does_not_abort_the_audit() {
    let mut chain = StubChain::healthy();
    chain.balance = None; // balance query fails
    chain.transfers = Some(vec![external_transfer(COUNTERPARTY)]); // no code => finding

    let config = test_config(&["insufficient-liquidity", "unverified-contracts"]);
    let auditor = WalletAuditor::new(config, chain);
    let findings = auditor.audit_wallet().await;

    assert_eq!(findings.len(), 1, "Failed check yields nothing, rest still run");
    assert_eq!(findings[0].check, CheckId::UnverifiedContracts);
}

#[tokio::test]
async fn test_zero_balance_end_to_end_line() {
    let mut chain = StubChain::healthy();
    chain.balance = Some(U256::ZERO);

    let auditor = WalletAuditor::new(test_config(&["insufficient-liquidity"]), chain);
    let findings = auditor.audit_wallet().await;

    assert_eq!(findings.len(), 1);
    assert_eq!(
        findings[0].render(),
        "insufficient-liquidity: wallet balance is low (Severity: high)"
    );
}

#[tokio::test]
async fn test_contract_checks_pass_on_coded_counterparties() {
    let mut chain = StubChain::healthy();
    chain.transfers = Some(vec![erc20_transfer(TOKEN), external_transfer(COUNTERPARTY)]);
    chain.coded = vec![addr(TOKEN), addr(COUNTERPARTY)];

    let config = test_config(&["unverified-contracts", "unsecured-ERC20-tokens"]);
    let auditor = WalletAuditor::new(config, chain);
    assert!(auditor.audit_wallet().await.is_empty());
}

#[tokio::test]
async fn test_duplicate_counterparties_reported_once() {
    let mut chain = StubChain::healthy();
    chain.transfers = Some(vec![
        external_transfer(COUNTERPARTY),
        external_transfer(COUNTERPARTY),
        external_transfer(COUNTERPARTY),
    ]);

    let auditor = WalletAuditor::new(test_config(&["unverified-contracts"]), chain);
    let findings = auditor.audit_wallet().await;

    assert_eq!(findings.len(), 1);
    let description = &findings[0].description;
    assert_eq!(
        description.matches("0x").count(),
        1,
        "Each address appears once: {}",
        description
    );
}

#[tokio::test]
async fn test_erc20_check_ignores_external_transfers() {
    // Only an external transfer to a codeless address: the ERC-20 check
    // has nothing to probe
    let mut chain = StubChain::healthy();
    chain.transfers = Some(vec![external_transfer(COUNTERPARTY)]);

    let auditor = WalletAuditor::new(test_config(&["unsecured-ERC20-tokens"]), chain);
    assert!(auditor.audit_wallet().await.is_empty());
}

#[tokio::test]
async fn test_enumeration_failure_contained_for_both_contract_checks() {
    let mut chain = StubChain::healthy();
    chain.balance = Some(U256::ZERO);
    chain.transfers = None; // enumeration fails

    let config = test_config(&[
        "unverified-contracts",
        "unsecured-ERC20-tokens",
        "insufficient-liquidity",
    ]);
    let auditor = WalletAuditor::new(config, chain);
    let findings = auditor.audit_wallet().await;

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].check, CheckId::InsufficientLiquidity);
}
