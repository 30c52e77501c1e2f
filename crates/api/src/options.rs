//! Façade configuration
//!
//! Options are plain data: build them in code with the setters, or load
//! them from TOML.
//!
//! ```toml
//! # Scope used by put_or_delete(.., should_add = false)
//! conditional_delete_scope = "configuration"   # or "requested"
//! # Create missing intermediate nodes on put/merge
//! create_parents = true
//! ```

use std::path::{Path, PathBuf};

use canopy_core::Scope;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which partition the delete branch of `put_or_delete` targets
///
/// The add branch always honors the caller's scope. Historically the delete
/// branch always targeted the configuration partition; that remains the
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionalDeleteScope {
    /// Always delete from [`Scope::Configuration`]
    #[default]
    Configuration,
    /// Delete from whatever scope the caller passed
    Requested,
}

impl ConditionalDeleteScope {
    /// Scope the delete is issued against
    pub fn resolve(&self, requested: Scope) -> Scope {
        match self {
            ConditionalDeleteScope::Configuration => Scope::Configuration,
            ConditionalDeleteScope::Requested => requested,
        }
    }
}

/// Options for a [`StoreFacade`](crate::StoreFacade)
///
/// ```
/// use canopy_api::{ConditionalDeleteScope, FacadeOptions};
///
/// let opts = FacadeOptions::new()
///     .conditional_delete_scope(ConditionalDeleteScope::Requested)
///     .create_parents(false);
/// assert!(!opts.create_parents);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FacadeOptions {
    /// Target of the conditional delete branch
    pub conditional_delete_scope: ConditionalDeleteScope,
    /// Create missing intermediate nodes on put and merge
    pub create_parents: bool,
}

impl Default for FacadeOptions {
    fn default() -> Self {
        Self {
            conditional_delete_scope: ConditionalDeleteScope::Configuration,
            create_parents: true,
        }
    }
}

impl FacadeOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the conditional delete target
    pub fn conditional_delete_scope(mut self, scope: ConditionalDeleteScope) -> Self {
        self.conditional_delete_scope = scope;
        self
    }

    /// Enable or disable parent creation on put and merge
    pub fn create_parents(mut self, enabled: bool) -> Self {
        self.create_parents = enabled;
        self
    }

    /// Parse options from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(text)?)
    }

    /// Load options from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Render options as TOML
    pub fn to_toml_string(&self) -> Result<String, OptionsError> {
        Ok(toml::to_string(self)?)
    }
}

/// Errors loading or rendering [`FacadeOptions`]
#[derive(Debug, Error)]
pub enum OptionsError {
    /// Options file could not be read
    #[error("failed to read options file {}: {source}", path.display())]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML did not describe valid options
    #[error("invalid options: {0}")]
    Parse(#[from] toml::de::Error),

    /// Options could not be rendered
    #[error("cannot render options: {0}")]
    Render(#[from] toml::ser::Error),
}
