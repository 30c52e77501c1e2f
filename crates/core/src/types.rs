//! Core types for the datastore façade
//!
//! This module defines the fundamental types used throughout the system:
//! - [`Scope`]: which partition a transaction targets
//! - [`TxnId`]: broker-assigned transaction identifier
//! - [`TransactionStatus`]: lifecycle of a single transaction

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ScopeParseError;

/// Logical partition of the store
///
/// Every read or write names exactly one scope. The two partitions are
/// independent trees: writing `/a` in [`Scope::Configuration`] never makes
/// `/a` visible in [`Scope::Operational`].
///
/// # Examples
///
/// ```
/// use canopy_core::Scope;
///
/// let scope: Scope = "operational".parse().unwrap();
/// assert_eq!(scope, Scope::Operational);
/// assert_eq!(Scope::Configuration.to_string(), "configuration");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Intended state, written by operators and applications
    Configuration,
    /// Observed state, written by the system itself
    Operational,
}

impl Scope {
    /// All scopes, in declaration order
    pub const ALL: [Scope; 2] = [Scope::Configuration, Scope::Operational];

    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Configuration => "configuration",
            Scope::Operational => "operational",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "configuration" | "config" => Ok(Scope::Configuration),
            "operational" | "oper" => Ok(Scope::Operational),
            _ => Err(ScopeParseError(s.to_string())),
        }
    }
}

/// Broker-assigned transaction identifier
///
/// Unique per broker instance, monotonically increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TxnId(pub u64);

impl std::fmt::Display for TxnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "txn-{}", self.0)
    }
}

/// Lifecycle of a single transaction
///
/// ```text
/// Open ──stage──> Open ──submit──> Submitted ──> Committed
///   │                                   └──────> Failed
///   └──cancel/close──> Cancelled
/// ```
///
/// `Committed`, `Failed` and `Cancelled` are terminal. A transaction never
/// returns to an earlier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Accepting staged modifications (or reads)
    Open,
    /// Handed to the store, outcome pending
    Submitted,
    /// All staged modifications were applied
    Committed,
    /// The store rejected the transaction; nothing was applied
    Failed,
    /// Released without submitting
    Cancelled,
}

impl TransactionStatus {
    /// Whether staging and reads are still accepted
    pub fn is_open(&self) -> bool {
        matches!(self, TransactionStatus::Open)
    }

    /// Whether the transaction reached a final state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Committed | TransactionStatus::Failed | TransactionStatus::Cancelled
        )
    }

    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Open => "open",
            TransactionStatus::Submitted => "submitted",
            TransactionStatus::Committed => "committed",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
