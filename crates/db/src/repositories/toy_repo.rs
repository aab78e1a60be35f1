//! Repository for the `toys_collection` table.

use async_trait::async_trait;
use sqlx::PgPool;
use toybox_core::listing::{escape_like, PriceSort};
use toybox_core::types::{new_toy_id, ToyId};

use crate::error::StoreResult;
use crate::models::toy::{DeleteResult, InsertOneResult, NewToy, Toy, ToyFields, UpdateResult};
use crate::store::{category_filter, ToyStore};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, toy_name, photo, price, quantity, category, rating, description, \
                       seller_email, created_at";

/// Natural storage order: insertion order.
const NATURAL_ORDER: &str = "created_at ASC, id ASC";

/// Provides the query primitives for toys.
pub struct ToyRepo;

impl ToyRepo {
    /// List toys in natural order with offset pagination.
    pub async fn list_page(pool: &PgPool, skip: i64, limit: i64) -> Result<Vec<Toy>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM toys_collection
             ORDER BY {NATURAL_ORDER}
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Toy>(&query)
            .bind(limit)
            .bind(skip)
            .fetch_all(pool)
            .await
    }

    /// Count all toys.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM toys_collection")
            .fetch_one(pool)
            .await
    }

    /// The `n` most expensive toys. Toys without a price come last.
    pub async fn top_by_price(pool: &PgPool, n: i64) -> Result<Vec<Toy>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM toys_collection
             ORDER BY price DESC NULLS LAST, {NATURAL_ORDER}
             LIMIT $1"
        );
        sqlx::query_as::<_, Toy>(&query)
            .bind(n)
            .fetch_all(pool)
            .await
    }

    /// List a seller's toys, optionally sorted by price. `None` lists toys
    /// without a seller.
    pub async fn list_by_seller(
        pool: &PgPool,
        email: Option<&str>,
        sort: PriceSort,
    ) -> Result<Vec<Toy>, sqlx::Error> {
        let order = match sort {
            PriceSort::Unsorted => NATURAL_ORDER.to_string(),
            PriceSort::Ascending => format!("price ASC NULLS FIRST, {NATURAL_ORDER}"),
            PriceSort::Descending => format!("price DESC NULLS LAST, {NATURAL_ORDER}"),
        };
        let query = format!(
            "SELECT {COLUMNS} FROM toys_collection
             WHERE seller_email IS NOT DISTINCT FROM $1::TEXT
             ORDER BY {order}"
        );
        sqlx::query_as::<_, Toy>(&query)
            .bind(email)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search on `toy_name`.
    ///
    /// `%`, `_` and `\` in `needle` match literally.
    pub async fn search_by_name(pool: &PgPool, needle: &str) -> Result<Vec<Toy>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM toys_collection
             WHERE toy_name ILIKE '%' || $1 || '%'
             ORDER BY {NATURAL_ORDER}"
        );
        sqlx::query_as::<_, Toy>(&query)
            .bind(escape_like(needle))
            .fetch_all(pool)
            .await
    }

    /// At most `n` toys in `category`, or the first `n` toys when `category`
    /// is `None`.
    pub async fn list_by_category(
        pool: &PgPool,
        category: Option<&str>,
        n: i64,
    ) -> Result<Vec<Toy>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM toys_collection
             WHERE ($1::TEXT IS NULL OR category = $1)
             ORDER BY {NATURAL_ORDER}
             LIMIT $2"
        );
        sqlx::query_as::<_, Toy>(&query)
            .bind(category)
            .bind(n)
            .fetch_all(pool)
            .await
    }

    /// Find a toy by its ID.
    pub async fn find_by_id(pool: &PgPool, id: ToyId) -> Result<Option<Toy>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM toys_collection WHERE id = $1");
        sqlx::query_as::<_, Toy>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new toy under a fresh id, returning that id.
    pub async fn create(pool: &PgPool, input: &NewToy) -> Result<ToyId, sqlx::Error> {
        let fields = &input.fields;
        sqlx::query_scalar::<_, ToyId>(
            "INSERT INTO toys_collection
                (id, toy_name, photo, price, quantity, category, rating, description,
                 seller_email, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
             RETURNING id",
        )
        .bind(new_toy_id())
        .bind(&fields.toy_name)
        .bind(&fields.photo)
        .bind(fields.price)
        .bind(fields.quantity)
        .bind(&fields.category)
        .bind(fields.rating)
        .bind(&fields.description)
        .bind(&input.seller_email)
        .fetch_one(pool)
        .await
    }

    /// Write every display field of toy `id` in one statement, inserting the
    /// toy if it does not exist.
    ///
    /// Returns `None` when the row already held these values, `Some(true)`
    /// when it was inserted and `Some(false)` when an existing row changed.
    pub async fn upsert_fields(
        pool: &PgPool,
        id: ToyId,
        fields: &ToyFields,
    ) -> Result<Option<bool>, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "INSERT INTO toys_collection
                (id, toy_name, photo, price, quantity, category, rating, description, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
             ON CONFLICT (id) DO UPDATE SET
                toy_name = EXCLUDED.toy_name,
                photo = EXCLUDED.photo,
                price = EXCLUDED.price,
                quantity = EXCLUDED.quantity,
                category = EXCLUDED.category,
                rating = EXCLUDED.rating,
                description = EXCLUDED.description
             WHERE (toys_collection.toy_name, toys_collection.photo, toys_collection.price,
                    toys_collection.quantity, toys_collection.category, toys_collection.rating,
                    toys_collection.description)
                   IS DISTINCT FROM
                   (EXCLUDED.toy_name, EXCLUDED.photo, EXCLUDED.price, EXCLUDED.quantity,
                    EXCLUDED.category, EXCLUDED.rating, EXCLUDED.description)
             RETURNING (xmax = 0) AS inserted",
        )
        .bind(id)
        .bind(&fields.toy_name)
        .bind(&fields.photo)
        .bind(fields.price)
        .bind(fields.quantity)
        .bind(&fields.category)
        .bind(fields.rating)
        .bind(&fields.description)
        .fetch_optional(pool)
        .await
    }

    /// Permanently delete a toy by ID. Returns the number of rows removed.
    pub async fn delete(pool: &PgPool, id: ToyId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM toys_collection WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// [`ToyStore`] backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgToyStore {
    pool: PgPool,
}

impl PgToyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ToyStore for PgToyStore {
    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn list_page(&self, skip: i64, limit: i64) -> StoreResult<Vec<Toy>> {
        Ok(ToyRepo::list_page(&self.pool, skip, limit).await?)
    }

    async fn count_all(&self) -> StoreResult<i64> {
        Ok(ToyRepo::count(&self.pool).await?)
    }

    async fn top_by_price(&self, n: i64) -> StoreResult<Vec<Toy>> {
        Ok(ToyRepo::top_by_price(&self.pool, n).await?)
    }

    async fn list_by_seller(
        &self,
        email: Option<&str>,
        sort: PriceSort,
    ) -> StoreResult<Vec<Toy>> {
        Ok(ToyRepo::list_by_seller(&self.pool, email, sort).await?)
    }

    async fn search_by_name(&self, needle: &str) -> StoreResult<Vec<Toy>> {
        Ok(ToyRepo::search_by_name(&self.pool, needle).await?)
    }

    async fn list_by_category(&self, category: Option<&str>, n: i64) -> StoreResult<Vec<Toy>> {
        Ok(ToyRepo::list_by_category(&self.pool, category_filter(category), n).await?)
    }

    async fn find_by_id(&self, id: ToyId) -> StoreResult<Option<Toy>> {
        Ok(ToyRepo::find_by_id(&self.pool, id).await?)
    }

    async fn insert(&self, input: &NewToy) -> StoreResult<InsertOneResult> {
        let id = ToyRepo::create(&self.pool, input).await?;
        tracing::debug!(%id, "Inserted toy");
        Ok(InsertOneResult::new(id))
    }

    async fn replace_fields(&self, id: ToyId, fields: &ToyFields) -> StoreResult<UpdateResult> {
        match ToyRepo::upsert_fields(&self.pool, id, fields).await? {
            Some(true) => {
                tracing::debug!(%id, "Upserted toy");
                Ok(UpdateResult::upserted(id))
            }
            Some(false) => {
                tracing::debug!(%id, "Replaced toy fields");
                Ok(UpdateResult::modified())
            }
            None => Ok(UpdateResult::unchanged()),
        }
    }

    async fn delete_by_id(&self, id: ToyId) -> StoreResult<DeleteResult> {
        let deleted = ToyRepo::delete(&self.pool, id).await?;
        tracing::debug!(%id, deleted, "Deleted toy");
        Ok(DeleteResult::new(deleted))
    }
}
