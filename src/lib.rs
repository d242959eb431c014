//! Wallet Sentry Library
//!
//! Minimal wallet risk auditor for Ethereum-compatible chains:
//! - queries one JSON-RPC node for balance, transaction history, and
//!   counterparty bytecode
//! - runs an ordered, configured list of named checks
//! - returns findings in configuration order, containing failures
//!   per-check instead of aborting

pub mod auditor;
pub mod config;
pub mod models;
pub mod providers;

pub use auditor::{WalletAuditor, LOW_BALANCE_THRESHOLD_WEI};
pub use config::AuditConfig;
pub use models::{AppError, AppResult, CheckId, ErrorCode, Finding, Severity};
pub use providers::{ChainClient, ChainReader, OutgoingTransfer, TransferKind};
