//! Errors surfaced by [`ToyStore`](crate::store::ToyStore) implementations.

/// A failed store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Any error reported by sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store could not be reached at all.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether the failure means the store is unreachable, as opposed to a
    /// query that reached it and failed.
    pub fn is_unavailable(&self) -> bool {
        match self {
            StoreError::Unavailable(_) => true,
            StoreError::Database(err) => matches!(
                err,
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
            ),
        }
    }
}

/// Convenience alias for store return values.
pub type StoreResult<T> = Result<T, StoreError>;
