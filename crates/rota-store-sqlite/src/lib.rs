//! SQLite backend for the Rota review store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! worker thread without blocking the async runtime. Each unit of work
//! executes as one closure on that thread inside one transaction, which
//! also serializes units of work with respect to each other.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
