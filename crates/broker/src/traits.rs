//! The data broker contract
//!
//! A broker hands out short-lived transactions against a scope-partitioned
//! tree store. Staging is synchronous; committing and reading return
//! futures that resolve once the store has answered.
//!
//! ```text
//! new_write_only_transaction()
//!     put / merge / delete   (stage, synchronous)
//!     submit()  ──> CommitFuture ──> Ok(CommitInfo) | Err(CommitError)
//!     cancel()               (release without submitting)
//!
//! new_read_only_transaction()
//!     read()    ──> ReadFuture   ──> Ok(Some(payload)) | Ok(None) | Err(ReadError)
//!     close()                (also on drop)
//! ```
//!
//! All trait objects are `Send` so a transaction can be driven from any
//! thread, and futures are `'static` so they never borrow the transaction.

use canopy_core::{CommitError, DataPath, Payload, ReadError, Scope, TransactionStatus, TxnId};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Future resolved when a write transaction commits or fails
pub type CommitFuture = BoxFuture<'static, Result<CommitInfo, CommitError>>;

/// Future resolved with the payload at a path, if any
pub type ReadFuture = BoxFuture<'static, Result<Option<Payload>, ReadError>>;

/// Outcome of a successful commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Transaction that committed
    pub txn_id: TxnId,
    /// Store version after applying the transaction
    pub version: u64,
}

/// Handle to a transactional tree store
///
/// Implementations are shared (`Arc<dyn DataBroker>`) between the host
/// system and any number of façades, and must tolerate concurrent use.
pub trait DataBroker: Send + Sync {
    /// Open a transaction that may only read
    fn new_read_only_transaction(&self) -> Box<dyn ReadTransaction>;

    /// Open a transaction that may only stage writes
    fn new_write_only_transaction(&self) -> Box<dyn WriteTransaction>;
}

/// Read side of a transaction
pub trait ReadTransaction: Send {
    /// Broker-assigned identifier
    fn id(&self) -> TxnId;

    /// Current lifecycle state
    fn status(&self) -> TransactionStatus;

    /// Request the payload at `path` in `scope`
    ///
    /// Resolves to `Ok(None)` when nothing is stored there.
    fn read(&self, scope: Scope, path: &DataPath) -> ReadFuture;

    /// Release the transaction. Idempotent.
    fn close(&mut self);
}

/// Write side of a transaction
///
/// Staging calls only record intent; nothing is visible to readers until
/// [`WriteTransaction::submit`] resolves successfully. Staging after submit
/// or cancel returns [`CommitError::NotActive`].
pub trait WriteTransaction: Send {
    /// Broker-assigned identifier
    fn id(&self) -> TxnId;

    /// Current lifecycle state
    fn status(&self) -> TransactionStatus;

    /// Stage a replace of the subtree at `path`
    ///
    /// With `create_parents`, missing intermediate nodes are created as
    /// empty containers at commit time.
    fn put(
        &mut self,
        scope: Scope,
        path: &DataPath,
        data: Payload,
        create_parents: bool,
    ) -> Result<(), CommitError>;

    /// Stage a non-destructive combine into the subtree at `path`
    fn merge(
        &mut self,
        scope: Scope,
        path: &DataPath,
        data: Payload,
        create_parents: bool,
    ) -> Result<(), CommitError>;

    /// Stage removal of the subtree at `path`
    fn delete(&mut self, scope: Scope, path: &DataPath) -> Result<(), CommitError>;

    /// Hand staged modifications to the store
    ///
    /// A second submit resolves to [`CommitError::NotActive`].
    fn submit(&mut self) -> CommitFuture;

    /// Discard staged modifications
    ///
    /// Returns `true` if the transaction was still open. Cancelling after
    /// submit has no effect on the commit.
    fn cancel(&mut self) -> bool;
}
