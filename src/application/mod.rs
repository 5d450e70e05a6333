//! Application layer managing state and business workflows.
//!
//! This module holds the favorite store, which owns the restaurant list and
//! keeps the saved favorites in step with it, and the terminal app state
//! built on top of it.

pub mod state;
pub mod store;

pub use state::*;
pub use store::*;
