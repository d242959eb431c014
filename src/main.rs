//! Wallet Sentry - wallet risk auditor for Ethereum-compatible chains
//!
//! Loads configuration from the environment, runs the configured checks
//! against one wallet, and prints the findings. Exits non-zero only on a
//! startup (configuration) failure; check failures are contained.

use eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wallet_sentry::auditor::WalletAuditor;
use wallet_sentry::config::AuditConfig;
use wallet_sentry::providers::chain::ChainClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the report
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = AuditConfig::from_env()?;
    let client = ChainClient::new(config.rpc_url.clone(), config.rpc_timeout)?;
    info!("Auditing wallet {} via {}", config.wallet, client.masked_url());

    let auditor = WalletAuditor::new(config, client);
    let findings = auditor.audit_wallet().await;

    println!("Vulnerabilities:");
    for finding in &findings {
        println!("  {}", finding.render());
    }

    Ok(())
}
