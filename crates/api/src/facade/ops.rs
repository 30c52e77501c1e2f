//! Async operation bodies behind the blocking façade

use canopy_broker::{CommitInfo, WriteTransaction};
use canopy_core::{
    decode_record, encode_record, CommitError, DataPath, Path, Payload, ReadError, Record,
    RecordError, Scope,
};
use tracing::{debug, error, warn, Instrument};

use super::StoreFacade;

/// A single staged write
enum WriteIntent {
    Put(Payload),
    Merge(Payload),
    Delete,
}

impl WriteIntent {
    fn op(&self) -> &'static str {
        match self {
            WriteIntent::Put(_) => "put",
            WriteIntent::Merge(_) => "merge",
            WriteIntent::Delete => "delete",
        }
    }

    fn stage(
        self,
        txn: &mut dyn WriteTransaction,
        scope: Scope,
        path: &DataPath,
        create_parents: bool,
    ) -> Result<(), CommitError> {
        match self {
            WriteIntent::Put(data) => txn.put(scope, path, data, create_parents),
            WriteIntent::Merge(data) => txn.merge(scope, path, data, create_parents),
            WriteIntent::Delete => txn.delete(scope, path),
        }
    }
}

impl StoreFacade {
    /// Async form of [`StoreFacade::read`]
    pub async fn read_async<R: Record>(&self, scope: Scope, path: &Path<R>) -> Option<R> {
        async {
            match self.try_read_async(scope, path).await {
                Ok(Some(record)) => Some(record),
                Ok(None) => {
                    debug!(%scope, %path, "no record at path");
                    None
                }
                Err(e) => {
                    warn!(%scope, %path, error = %e, "read failed");
                    None
                }
            }
        }
        .instrument(self.span.clone())
        .await
    }

    /// Async form of [`StoreFacade::try_read`]
    pub async fn try_read_async<R: Record>(
        &self,
        scope: Scope,
        path: &Path<R>,
    ) -> Result<Option<R>, ReadError> {
        let mut txn = self.broker.new_read_only_transaction();
        let result = txn.read(scope, path.as_data_path()).await;
        txn.close();

        match result? {
            None => Ok(None),
            Some(payload) => decode_record(payload).map(Some).map_err(|e| {
                let message = match e {
                    RecordError::Decode(message) | RecordError::Encode(message) => message,
                };
                ReadError::Decode {
                    path: path.to_string(),
                    message,
                }
            }),
        }
    }

    /// Async form of [`StoreFacade::put`]
    pub async fn put_async<R: Record>(&self, scope: Scope, path: &Path<R>, record: &R) -> bool {
        async {
            match encode_record(record) {
                Ok(data) => self.write(scope, path.as_data_path(), WriteIntent::Put(data)).await,
                Err(e) => {
                    warn!(op = "put", %scope, %path, error = %e, "write failed");
                    false
                }
            }
        }
        .instrument(self.span.clone())
        .await
    }

    /// Async form of [`StoreFacade::merge`]
    pub async fn merge_async<R: Record>(&self, scope: Scope, path: &Path<R>, record: &R) -> bool {
        async {
            match encode_record(record) {
                Ok(data) => {
                    self.write(scope, path.as_data_path(), WriteIntent::Merge(data))
                        .await
                }
                Err(e) => {
                    warn!(op = "merge", %scope, %path, error = %e, "write failed");
                    false
                }
            }
        }
        .instrument(self.span.clone())
        .await
    }

    /// Async form of [`StoreFacade::delete`]
    pub async fn delete_async<R: Record>(&self, scope: Scope, path: &Path<R>) -> bool {
        self.write(scope, path.as_data_path(), WriteIntent::Delete)
            .instrument(self.span.clone())
            .await
    }

    /// Async form of [`StoreFacade::put_or_delete`]
    pub async fn put_or_delete_async<R: Record>(
        &self,
        scope: Scope,
        path: &Path<R>,
        record: Option<&R>,
        should_add: bool,
    ) -> bool {
        async {
            let (scope, intent) = if should_add {
                let Some(record) = record else {
                    warn!(%scope, %path, "put_or_delete asked to add without a record");
                    return false;
                };
                match encode_record(record) {
                    Ok(data) => (scope, WriteIntent::Put(data)),
                    Err(e) => {
                        error!(op = "put", %scope, %path, error = %e, "transaction failed");
                        return false;
                    }
                }
            } else {
                (
                    self.options.conditional_delete_scope.resolve(scope),
                    WriteIntent::Delete,
                )
            };

            let op = intent.op();
            let mut txn = self.broker.new_write_only_transaction();
            let txn_id = txn.id();
            match self.stage_and_submit(txn.as_mut(), scope, path.as_data_path(), intent).await {
                Ok(info) => {
                    debug!(
                        op,
                        %scope,
                        %path,
                        txn = %txn_id,
                        version = info.version,
                        "transaction succeeded"
                    );
                    true
                }
                Err(e) => {
                    error!(op, %scope, %path, txn = %txn_id, error = %e, "transaction failed");
                    txn.cancel();
                    false
                }
            }
        }
        .instrument(self.span.clone())
        .await
    }

    /// One write transaction carrying one modification. Logs a warning and
    /// cancels on failure. Caller instruments.
    async fn write(&self, scope: Scope, path: &DataPath, intent: WriteIntent) -> bool {
        let op = intent.op();
        let mut txn = self.broker.new_write_only_transaction();
        match self.stage_and_submit(txn.as_mut(), scope, path, intent).await {
            Ok(_) => true,
            Err(e) => {
                warn!(op, %scope, %path, txn = %txn.id(), error = %e, "write failed");
                txn.cancel();
                false
            }
        }
    }

    async fn stage_and_submit(
        &self,
        txn: &mut dyn WriteTransaction,
        scope: Scope,
        path: &DataPath,
        intent: WriteIntent,
    ) -> Result<CommitInfo, CommitError> {
        intent.stage(txn, scope, path, self.options.create_parents)?;
        txn.submit().await
    }
}
