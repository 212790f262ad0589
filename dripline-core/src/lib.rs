//! # dripline-core
//!
//! Native core of the dripline node library.
//! Defines the error type, node configuration, alert message schema, and
//! alert consumption. The Python surface lives in the `dripline-py` crate.

pub mod config;
pub mod consumer;
pub mod errors;
pub mod message;

// Re-export the most commonly used types at the crate root.
pub use config::NodeConfig;
pub use consumer::{AlertConsumer, AlertHandler};
pub use errors::{DriplineError, DriplineResult};
pub use message::AlertMessage;
