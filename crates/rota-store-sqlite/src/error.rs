//! Error type for `rota-store-sqlite`.
//!
//! Covers opening the database and running the schema. Failures inside a
//! unit of work surface as [`rota_core::Error::Storage`] instead, per the
//! persistence contract.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
