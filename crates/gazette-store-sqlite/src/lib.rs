//! SQLite backend for the Gazette news store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod listing;
mod schema;
mod seed;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

/// The development dataset bundled with the workspace.
pub const DEV_DATA: &str = include_str!("../../../data/dev-data.json");
