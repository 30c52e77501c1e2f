//! Entry point for wiring a façade to a broker.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use canopy_api::{FacadeOptions, StoreFacade};
use canopy_broker::{DataBroker, InMemoryBroker};
use tracing::Span;

use crate::error::{Error, Result};

/// Builder for a [`StoreFacade`].
///
/// # Example
///
/// ```
/// use canopy::prelude::*;
///
/// let facade = CanopyBuilder::new()
///     .in_memory()
///     .options(FacadeOptions::new().create_parents(false))
///     .build()
///     .unwrap();
/// assert!(!facade.options().create_parents);
/// ```
#[derive(Default)]
pub struct CanopyBuilder {
    broker: Option<Arc<dyn DataBroker>>,
    options: OptionsSource,
    span: Option<Span>,
}

#[derive(Default)]
enum OptionsSource {
    #[default]
    Defaults,
    Inline(FacadeOptions),
    File(PathBuf),
}

impl CanopyBuilder {
    /// Create a new builder with no broker and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing broker.
    pub fn broker(mut self, broker: Arc<dyn DataBroker>) -> Self {
        self.broker = Some(broker);
        self
    }

    /// Use a fresh [`InMemoryBroker`].
    ///
    /// Keep a handle for inspection by building the broker yourself and
    /// passing a clone to [`CanopyBuilder::broker`].
    pub fn in_memory(self) -> Self {
        self.broker(Arc::new(InMemoryBroker::new()))
    }

    /// Use these options. Replaces an earlier [`CanopyBuilder::options_file`].
    pub fn options(mut self, options: FacadeOptions) -> Self {
        self.options = OptionsSource::Inline(options);
        self
    }

    /// Load options from a TOML file at build time. Replaces earlier
    /// [`CanopyBuilder::options`].
    pub fn options_file(mut self, path: impl AsRef<Path>) -> Self {
        self.options = OptionsSource::File(path.as_ref().to_path_buf());
        self
    }

    /// Emit façade events inside `span`.
    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Build the façade.
    ///
    /// Fails when no broker was configured or the options file cannot be
    /// loaded.
    pub fn build(self) -> Result<StoreFacade> {
        let broker = self.broker.ok_or(Error::NoBroker)?;
        let options = match self.options {
            OptionsSource::Defaults => FacadeOptions::default(),
            OptionsSource::Inline(options) => options,
            OptionsSource::File(path) => FacadeOptions::from_file(path)?,
        };

        let facade = StoreFacade::with_options(broker, options);
        Ok(match self.span {
            Some(span) => facade.with_span(span),
            None => facade,
        })
    }
}

/// Façade over a fresh in-memory broker, plus a handle to that broker.
pub fn in_memory() -> (InMemoryBroker, StoreFacade) {
    let broker = InMemoryBroker::new();
    let facade = StoreFacade::new(Arc::new(broker.clone()));
    (broker, facade)
}
