//! Restaurants - favorites that survive a restart
//!
//! Fetches a list of restaurants, lets the user mark favorites, and restores
//! those favorites when the in-memory state is lost and rebuilt.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
