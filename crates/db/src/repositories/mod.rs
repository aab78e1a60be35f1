//! Query layer over the PostgreSQL tables.

pub mod toy_repo;

pub use toy_repo::{PgToyStore, ToyRepo};
