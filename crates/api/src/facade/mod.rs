//! Store façade - one-call transactional access
//!
//! [`StoreFacade`] turns each call into exactly one short-lived broker
//! transaction, drives it to completion and reports the outcome as a plain
//! value. Expected failures are logged and folded into the return value;
//! nothing panics and nothing is returned as an error.
//!
//! ## Desugaring
//!
//! | Façade | Broker |
//! |--------|--------|
//! | `read(scope, path)` | `read_only(); read(scope, path); close()` |
//! | `put(scope, path, r)` | `write_only(); put(scope, path, r, create_parents); submit()` |
//! | `merge(scope, path, r)` | `write_only(); merge(scope, path, r, create_parents); submit()` |
//! | `delete(scope, path)` | `write_only(); delete(scope, path); submit()` |
//! | `put_or_delete(scope, path, Some(r), true)` | `write_only(); put(scope, ..); submit()`, `cancel()` on error |
//! | `put_or_delete(scope, path, _, false)` | `write_only(); delete(CONFIGURATION, ..); submit()`, `cancel()` on error |
//!
//! ## Outcomes
//!
//! | Operation | Success | Absent | Failure |
//! |-----------|---------|--------|---------|
//! | `read` | `Some(r)` | `None`, debug log | `None`, warn log |
//! | `try_read` | `Ok(Some(r))` | `Ok(None)` | `Err(ReadError)` |
//! | `put` / `merge` / `delete` | `true` | - | `false`, warn log |
//! | `put_or_delete` | `true`, debug log | - | `false`, error log (warn for a missing record) |
//!
//! ## Blocking and async
//!
//! Every operation has an `*_async` form returning the same type. The
//! blocking form runs it to completion on the calling thread with
//! `futures::executor::block_on`, so it must not be called from inside an
//! async executor's worker thread.
//!
//! ## Logging
//!
//! Events are emitted with `tracing` inside the façade's span. Pass a span
//! with [`StoreFacade::with_span`] to attach caller context (component,
//! tenant, ...) to every event.

mod ops;

use std::fmt;
use std::sync::Arc;

use canopy_broker::DataBroker;
use canopy_core::{Path, ReadError, Record, Scope};
use futures::executor::block_on;
use tracing::Span;

use crate::options::FacadeOptions;

/// Blocking, fail-soft access to a transactional store
///
/// Holds a shared broker handle, its options and a tracing span; no state
/// is kept between calls, so a façade can be shared freely across threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use canopy_api::StoreFacade;
/// use canopy_broker::InMemoryBroker;
/// use canopy_core::{Path, Scope};
///
/// let facade = StoreFacade::new(Arc::new(InMemoryBroker::new()));
/// let path: Path<serde_json::Value> = Path::parse("/a/b").unwrap();
///
/// assert!(facade.put(Scope::Configuration, &path, &serde_json::json!({"x": 1})));
/// assert_eq!(
///     facade.read(Scope::Configuration, &path),
///     Some(serde_json::json!({"x": 1}))
/// );
/// assert!(facade.delete(Scope::Configuration, &path));
/// assert_eq!(facade.read(Scope::Configuration, &path), None);
/// ```
#[derive(Clone)]
pub struct StoreFacade {
    broker: Arc<dyn DataBroker>,
    options: FacadeOptions,
    span: Span,
}

impl StoreFacade {
    /// Create a façade with default options
    pub fn new(broker: Arc<dyn DataBroker>) -> Self {
        Self::with_options(broker, FacadeOptions::default())
    }

    /// Create a façade with explicit options
    pub fn with_options(broker: Arc<dyn DataBroker>, options: FacadeOptions) -> Self {
        Self {
            broker,
            options,
            span: Span::none(),
        }
    }

    /// Emit every event of this façade inside `span`
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// The shared broker handle
    pub fn broker(&self) -> &Arc<dyn DataBroker> {
        &self.broker
    }

    /// Active options
    pub fn options(&self) -> &FacadeOptions {
        &self.options
    }

    /// Span events are emitted in
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Read the record at `path`, blocking until the store answers
    ///
    /// Absence and read failure both yield `None`; use
    /// [`StoreFacade::try_read`] to tell them apart.
    pub fn read<R: Record>(&self, scope: Scope, path: &Path<R>) -> Option<R> {
        block_on(self.read_async(scope, path))
    }

    /// Read the record at `path`, reporting failures to the caller
    ///
    /// Does not log.
    pub fn try_read<R: Record>(&self, scope: Scope, path: &Path<R>) -> Result<Option<R>, ReadError> {
        block_on(self.try_read_async(scope, path))
    }

    /// Replace the subtree at `path` with `record`, creating parents
    pub fn put<R: Record>(&self, scope: Scope, path: &Path<R>, record: &R) -> bool {
        block_on(self.put_async(scope, path, record))
    }

    /// Combine `record` into the subtree at `path`, creating parents
    pub fn merge<R: Record>(&self, scope: Scope, path: &Path<R>, record: &R) -> bool {
        block_on(self.merge_async(scope, path, record))
    }

    /// Remove the subtree at `path`
    pub fn delete<R: Record>(&self, scope: Scope, path: &Path<R>) -> bool {
        block_on(self.delete_async(scope, path))
    }

    /// Put `record` when `should_add`, otherwise delete
    ///
    /// The delete branch targets the scope chosen by
    /// [`FacadeOptions::conditional_delete_scope`], which defaults to
    /// [`Scope::Configuration`] whatever `scope` says. Adding without a
    /// record fails before any transaction is opened.
    pub fn put_or_delete<R: Record>(
        &self,
        scope: Scope,
        path: &Path<R>,
        record: Option<&R>,
        should_add: bool,
    ) -> bool {
        block_on(self.put_or_delete_async(scope, path, record, should_add))
    }
}

impl fmt::Debug for StoreFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreFacade")
            .field("options", &self.options)
            .field("span", &self.span)
            .finish_non_exhaustive()
    }
}
