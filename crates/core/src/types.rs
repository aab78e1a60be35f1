use crate::error::CoreError;

/// Toy identifiers are UUIDs assigned by the store.
///
/// New ids are v7 so they sort in creation order.
pub type ToyId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh identifier for a newly inserted toy.
pub fn new_toy_id() -> ToyId {
    uuid::Uuid::now_v7()
}

/// Parse a path segment into a [`ToyId`].
///
/// Anything that is not a UUID is reported as
/// [`CoreError::InvalidIdentifier`] carrying the raw input.
pub fn parse_toy_id(raw: &str) -> Result<ToyId, CoreError> {
    raw.trim()
        .parse::<ToyId>()
        .map_err(|_| CoreError::InvalidIdentifier(raw.to_string()))
}
