//! Store façade for Canopy
//!
//! [`StoreFacade`] wraps a [`DataBroker`](canopy_broker::DataBroker) so that
//! reading or writing one node is a single call: open a transaction, stage
//! one operation, submit or close, report a plain outcome.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod facade;
pub mod options;

pub use facade::StoreFacade;
pub use options::{ConditionalDeleteScope, FacadeOptions, OptionsError};
