//! Infrastructure layer providing external service integrations.
//!
//! Persistence of the favorite ids, the restaurant sources, environment
//! configuration and log output.

pub mod config;
pub mod logging;
pub mod persistence;
pub mod source;

pub use config::*;
pub use logging::*;
pub use persistence::*;
pub use source::*;
