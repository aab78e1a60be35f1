//! The storage gateway seen by the HTTP layer.

use async_trait::async_trait;
use toybox_core::listing::PriceSort;
use toybox_core::types::ToyId;

use crate::error::StoreResult;
use crate::models::toy::{DeleteResult, InsertOneResult, NewToy, Toy, ToyFields, UpdateResult};

/// Typed access to the toy collection.
///
/// Every call maps to a single query against the shared collection. Unsorted
/// listings come back in natural order (oldest first). Price sorts put
/// toys without a price first when ascending and last when descending, and
/// keep natural order between equal prices.
#[async_trait]
pub trait ToyStore: Send + Sync {
    /// Cheap round trip proving the store is reachable.
    async fn ping(&self) -> StoreResult<()>;

    /// Natural-order listing, skipping `skip` toys and returning at most `limit`.
    async fn list_page(&self, skip: i64, limit: i64) -> StoreResult<Vec<Toy>>;

    /// Number of toys in the collection.
    async fn count_all(&self) -> StoreResult<i64>;

    /// The `n` highest-priced toys, most expensive first.
    async fn top_by_price(&self, n: i64) -> StoreResult<Vec<Toy>>;

    /// Toys owned by `email` (exact match), ordered per `sort`. `None`
    /// matches toys without a seller.
    async fn list_by_seller(
        &self,
        email: Option<&str>,
        sort: PriceSort,
    ) -> StoreResult<Vec<Toy>>;

    /// Toys whose name contains `needle`, ignoring case.
    async fn search_by_name(&self, needle: &str) -> StoreResult<Vec<Toy>>;

    /// At most `n` toys in `category`. A missing or empty category applies no
    /// filter and returns the first `n` toys of the whole collection.
    async fn list_by_category(&self, category: Option<&str>, n: i64) -> StoreResult<Vec<Toy>>;

    async fn find_by_id(&self, id: ToyId) -> StoreResult<Option<Toy>>;

    /// Persist a new toy. The store assigns its id and `created_at`.
    async fn insert(&self, input: &NewToy) -> StoreResult<InsertOneResult>;

    /// Replace every mutable display field of toy `id`, creating the toy if it
    /// does not exist.
    async fn replace_fields(&self, id: ToyId, fields: &ToyFields) -> StoreResult<UpdateResult>;

    /// Remove toy `id`. Removing a missing toy reports a count of zero.
    async fn delete_by_id(&self, id: ToyId) -> StoreResult<DeleteResult>;
}

/// Normalise a category filter: an empty string means "no filter".
pub(crate) fn category_filter(category: Option<&str>) -> Option<&str> {
    category.filter(|c| !c.is_empty())
}
