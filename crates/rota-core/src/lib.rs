//! Core types and trait definitions for the Rota review service.
//!
//! This crate is deliberately free of HTTP and database dependencies: it
//! holds the domain model, the reviewer-selection logic, the persistence
//! contract, and the workflows that orchestrate the two. All other crates
//! depend on it.

pub mod assign;
pub mod error;
pub mod pull_request;
pub mod store;
pub mod team;
pub mod workflow;

pub use error::{Error, Result};
