//! Staged modifications
//!
//! A write transaction buffers [`Modification`]s in staging order and
//! applies them together at commit.

use canopy_core::{DataPath, Payload, Scope, TxnId};
use serde::{Deserialize, Serialize};

/// What a modification does to its target node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModificationKind {
    /// Replace the subtree
    Put,
    /// Combine into the subtree
    Merge,
    /// Remove the subtree
    Delete,
}

impl ModificationKind {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ModificationKind::Put => "put",
            ModificationKind::Merge => "merge",
            ModificationKind::Delete => "delete",
        }
    }
}

impl std::fmt::Display for ModificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One staged write
#[derive(Debug, Clone, PartialEq)]
pub enum Modification {
    /// Replace the subtree at `path`
    Put {
        /// Target partition
        scope: Scope,
        /// Target node
        path: DataPath,
        /// New subtree
        data: Payload,
        /// Create missing intermediate nodes
        create_parents: bool,
    },
    /// Combine `data` into the subtree at `path`
    Merge {
        /// Target partition
        scope: Scope,
        /// Target node
        path: DataPath,
        /// Subtree to combine
        data: Payload,
        /// Create missing intermediate nodes
        create_parents: bool,
    },
    /// Remove the subtree at `path`
    Delete {
        /// Target partition
        scope: Scope,
        /// Target node
        path: DataPath,
    },
}

impl Modification {
    /// Partition this modification targets
    pub fn scope(&self) -> Scope {
        match self {
            Modification::Put { scope, .. }
            | Modification::Merge { scope, .. }
            | Modification::Delete { scope, .. } => *scope,
        }
    }

    /// Node this modification targets
    pub fn path(&self) -> &DataPath {
        match self {
            Modification::Put { path, .. }
            | Modification::Merge { path, .. }
            | Modification::Delete { path, .. } => path,
        }
    }

    /// Kind of modification
    pub fn kind(&self) -> ModificationKind {
        match self {
            Modification::Put { .. } => ModificationKind::Put,
            Modification::Merge { .. } => ModificationKind::Merge,
            Modification::Delete { .. } => ModificationKind::Delete,
        }
    }
}

/// Record of a committed modification, kept by brokers that journal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Transaction that applied it
    pub txn_id: TxnId,
    /// Store version the transaction produced
    pub version: u64,
    /// Target partition
    pub scope: Scope,
    /// Target node
    pub path: DataPath,
    /// What was done
    pub kind: ModificationKind,
}
