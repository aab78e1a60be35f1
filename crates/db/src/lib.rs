use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod error;
#[cfg(feature = "memory")]
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use repositories::PgToyStore;
pub use store::ToyStore;

pub type DbPool = sqlx::PgPool;

/// Name of the database holding the toy collection.
pub const DATABASE_NAME: &str = "toys";

/// Connection settings for the managed PostgreSQL cluster.
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

impl DbConfig {
    /// Build sqlx connect options against the [`DATABASE_NAME`] database.
    ///
    /// Credentials are passed as discrete options so they never need URL
    /// escaping.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(DATABASE_NAME)
    }
}

/// Create a connection pool without connecting.
///
/// Connections are opened on first use, so an unreachable database surfaces
/// as a failed query instead of aborting startup.
pub fn create_pool(config: &DbConfig) -> DbPool {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_lazy_with(config.connect_options())
}

/// Round-trip a trivial query to prove the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
