//! In-memory [`ToyStore`] with the same semantics as [`PgToyStore`].
//!
//! Toys are kept in insertion order, which is the natural order the
//! PostgreSQL store uses as well. The store can be flipped into an
//! unavailable mode to exercise storage-failure handling.
//!
//! [`PgToyStore`]: crate::repositories::PgToyStore

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use toybox_core::listing::{contains_ignore_case, PriceSort};
use toybox_core::types::{new_toy_id, ToyId};

use crate::error::{StoreError, StoreResult};
use crate::models::toy::{DeleteResult, InsertOneResult, NewToy, Toy, ToyFields, UpdateResult};
use crate::store::{category_filter, ToyStore};

#[derive(Default)]
pub struct MemoryToyStore {
    toys: RwLock<Vec<Toy>>,
    unavailable: AtomicBool,
}

impl MemoryToyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`]
    /// (or succeed again when `false`).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, AtomicOrdering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(AtomicOrdering::SeqCst) {
            Err(StoreError::Unavailable("in-memory store is offline".into()))
        } else {
            Ok(())
        }
    }
}

/// Price comparison with missing prices ordered below every number.
fn compare_price(a: &Toy, b: &Toy) -> Ordering {
    match (a.price, b.price) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn to_usize(n: i64) -> usize {
    usize::try_from(n.max(0)).unwrap_or(usize::MAX)
}

#[async_trait]
impl ToyStore for MemoryToyStore {
    async fn ping(&self) -> StoreResult<()> {
        self.check_available()
    }

    async fn list_page(&self, skip: i64, limit: i64) -> StoreResult<Vec<Toy>> {
        self.check_available()?;
        let toys = self.toys.read().await;
        Ok(toys
            .iter()
            .skip(to_usize(skip))
            .take(to_usize(limit))
            .cloned()
            .collect())
    }

    async fn count_all(&self) -> StoreResult<i64> {
        self.check_available()?;
        let len = self.toys.read().await.len();
        Ok(i64::try_from(len).unwrap_or(i64::MAX))
    }

    async fn top_by_price(&self, n: i64) -> StoreResult<Vec<Toy>> {
        self.check_available()?;
        let mut toys = self.toys.read().await.clone();
        // Stable sort keeps natural order between equal prices.
        toys.sort_by(|a, b| compare_price(b, a));
        toys.truncate(to_usize(n));
        Ok(toys)
    }

    async fn list_by_seller(
        &self,
        email: Option<&str>,
        sort: PriceSort,
    ) -> StoreResult<Vec<Toy>> {
        self.check_available()?;
        let mut toys: Vec<Toy> = self
            .toys
            .read()
            .await
            .iter()
            .filter(|t| t.seller_email.as_deref() == email)
            .cloned()
            .collect();

        match sort {
            PriceSort::Unsorted => {}
            PriceSort::Ascending => toys.sort_by(compare_price),
            PriceSort::Descending => toys.sort_by(|a, b| compare_price(b, a)),
        }
        Ok(toys)
    }

    async fn search_by_name(&self, needle: &str) -> StoreResult<Vec<Toy>> {
        self.check_available()?;
        Ok(self
            .toys
            .read()
            .await
            .iter()
            .filter(|t| {
                t.toy_name
                    .as_deref()
                    .is_some_and(|name| contains_ignore_case(name, needle))
            })
            .cloned()
            .collect())
    }

    async fn list_by_category(&self, category: Option<&str>, n: i64) -> StoreResult<Vec<Toy>> {
        self.check_available()?;
        let category = category_filter(category);
        Ok(self
            .toys
            .read()
            .await
            .iter()
            .filter(|t| category.is_none() || t.category.as_deref() == category)
            .take(to_usize(n))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: ToyId) -> StoreResult<Option<Toy>> {
        self.check_available()?;
        Ok(self.toys.read().await.iter().find(|t| t.id == id).cloned())
    }

    async fn insert(&self, input: &NewToy) -> StoreResult<InsertOneResult> {
        self.check_available()?;
        let id = new_toy_id();
        let toy = Toy::from_new(id, input, chrono::Utc::now());
        self.toys.write().await.push(toy);
        Ok(InsertOneResult::new(id))
    }

    async fn replace_fields(&self, id: ToyId, fields: &ToyFields) -> StoreResult<UpdateResult> {
        self.check_available()?;
        let mut toys = self.toys.write().await;

        match toys.iter_mut().find(|t| t.id == id) {
            Some(toy) if toy.fields() == *fields => Ok(UpdateResult::unchanged()),
            Some(toy) => {
                toy.apply(fields);
                Ok(UpdateResult::modified())
            }
            None => {
                toys.push(Toy::from_fields(id, fields, chrono::Utc::now()));
                Ok(UpdateResult::upserted(id))
            }
        }
    }

    async fn delete_by_id(&self, id: ToyId) -> StoreResult<DeleteResult> {
        self.check_available()?;
        let mut toys = self.toys.write().await;
        let before = toys.len();
        toys.retain(|t| t.id != id);
        Ok(DeleteResult::new((before - toys.len()) as u64))
    }
}
