//! Convenient imports for Canopy.
//!
//! ```
//! use canopy::prelude::*;
//!
//! let (_broker, facade) = canopy::in_memory();
//! let path: Path<u32> = Path::parse("/counter").unwrap();
//! assert!(facade.put(Scope::Operational, &path, &1));
//! ```

// Entry points
pub use crate::builder::CanopyBuilder;
pub use crate::{FacadeOptions, StoreFacade};

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use crate::{ConditionalDeleteScope, DataPath, Path, Record, Scope};

// Brokers
pub use crate::{DataBroker, InMemoryBroker};

// Re-export serde_json for convenience
pub use serde_json::json;
