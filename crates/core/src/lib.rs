//! Shared types and helpers for the toy marketplace backend.
//!
//! This crate has no internal dependencies so both the storage layer and the
//! HTTP layer can build on it.

pub mod error;
pub mod listing;
pub mod types;
