//! Type definitions for Wallet Sentry
//! Core data structures for the audit pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity classification for findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Low severity - worth a look
    Low,
    /// Medium severity - proceed with caution
    Medium,
    /// High severity - likely to lose funds
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known wallet checks, dispatched by exact identifier match.
/// Any other identifier is logged and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckId {
    /// Native balance below the low-balance threshold
    #[serde(rename = "insufficient-liquidity")]
    InsufficientLiquidity,
    /// Recent counterparties with no deployed bytecode
    #[serde(rename = "unverified-contracts")]
    UnverifiedContracts,
    /// Recently transferred ERC-20 tokens with no live contract
    #[serde(rename = "unsecured-ERC20-tokens")]
    UnsecuredErc20Tokens,
}

impl CheckId {
    /// All known checks, in the default configuration order
    pub const ALL: [CheckId; 3] = [
        CheckId::InsufficientLiquidity,
        CheckId::UnverifiedContracts,
        CheckId::UnsecuredErc20Tokens,
    ];

    /// Get the configuration identifier for this check
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckId::InsufficientLiquidity => "insufficient-liquidity",
            CheckId::UnverifiedContracts => "unverified-contracts",
            CheckId::UnsecuredErc20Tokens => "unsecured-ERC20-tokens",
        }
    }

    /// Look up a check by its configuration identifier
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "insufficient-liquidity" => Some(CheckId::InsufficientLiquidity),
            "unverified-contracts" => Some(CheckId::UnverifiedContracts),
            "unsecured-ERC20-tokens" => Some(CheckId::UnsecuredErc20Tokens),
            _ => None,
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported risk observation, immutable once produced.
/// A check yields at most one Finding per audit run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Which check produced this finding
    pub check: CheckId,
    /// How bad it is
    pub severity: Severity,
    /// Human-readable description
    pub description: String,
}

impl Finding {
    pub fn new(check: CheckId, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            check,
            severity,
            description: description.into(),
        }
    }

    /// Render the finding as one report line
    pub fn render(&self) -> String {
        format!(
            "{}: {} (Severity: {})",
            self.check, self.description, self.severity
        )
    }
}
