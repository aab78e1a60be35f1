//! PostgreSQL-backed tests for `PgToyStore`.
//!
//! Each test gets a fresh database from `DATABASE_URL` with the embedded
//! migrations applied.

use sqlx::PgPool;
use toybox_core::listing::PriceSort;
use toybox_core::types::new_toy_id;
use toybox_db::models::toy::{NewToy, ToyFields, UpdateResult};
use toybox_db::{PgToyStore, ToyStore};

fn new_toy(name: &str, price: Option<f64>, category: &str, seller: &str) -> NewToy {
    NewToy {
        fields: ToyFields {
            toy_name: Some(name.into()),
            price,
            category: Some(category.into()),
            quantity: Some(1.0),
            ..ToyFields::default()
        },
        seller_email: Some(seller.into()),
    }
}

async fn seeded(pool: PgPool) -> PgToyStore {
    let store = PgToyStore::new(pool);
    for input in [
        new_toy("Teddy Bear", Some(15.0), "plush", "ann@example.com"),
        new_toy("Race Car", Some(30.0), "vehicles", "bob@example.com"),
        new_toy("Polar Bear", None, "plush", "ann@example.com"),
        new_toy("100% Robot", Some(45.0), "robots", "ann@example.com"),
    ] {
        store.insert(&input).await.unwrap();
    }
    store
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn insert_then_find_round_trips(pool: PgPool) {
    let store = PgToyStore::new(pool);
    let input = new_toy("Kite", Some(9.5), "outdoor", "kim@example.com");

    let inserted = store.insert(&input).await.unwrap();
    assert!(inserted.acknowledged);

    let toy = store.find_by_id(inserted.inserted_id).await.unwrap().unwrap();
    assert_eq!(toy.fields(), input.fields);
    assert_eq!(toy.seller_email.as_deref(), Some("kim@example.com"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn count_and_pages(pool: PgPool) {
    let store = seeded(pool).await;
    assert_eq!(store.count_all().await.unwrap(), 4);

    let first = store.list_page(0, 2).await.unwrap();
    let second = store.list_page(2, 2).await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert!(first.iter().all(|a| second.iter().all(|b| a.id != b.id)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn price_sorts_handle_missing_prices(pool: PgPool) {
    let store = seeded(pool).await;

    let top = store.top_by_price(4).await.unwrap();
    assert_eq!(top[0].price, Some(45.0));
    assert_eq!(top[3].price, None);

    let asc = store
        .list_by_seller(Some("ann@example.com"), PriceSort::Ascending)
        .await
        .unwrap();
    let prices: Vec<_> = asc.iter().map(|t| t.price).collect();
    assert_eq!(prices, [None, Some(15.0), Some(45.0)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_is_case_insensitive_and_literal(pool: PgPool) {
    let store = seeded(pool).await;

    assert_eq!(store.search_by_name("BEAR").await.unwrap().len(), 2);
    assert_eq!(store.search_by_name("100%").await.unwrap().len(), 1);
    assert!(store.search_by_name("_").await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_listing(pool: PgPool) {
    let store = seeded(pool).await;

    let plush = store.list_by_category(Some("plush"), 3).await.unwrap();
    assert_eq!(plush.len(), 2);
    assert!(plush.iter().all(|t| t.category.as_deref() == Some("plush")));

    assert_eq!(store.list_by_category(None, 3).await.unwrap().len(), 3);
    assert_eq!(store.list_by_category(Some(""), 3).await.unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_fields_modifies_then_reports_unchanged(pool: PgPool) {
    let store = seeded(pool).await;
    let original = store.list_page(0, 1).await.unwrap().remove(0);

    let fields = ToyFields {
        toy_name: Some("Big Teddy".into()),
        price: Some(20.0),
        ..ToyFields::default()
    };
    assert_eq!(
        store.replace_fields(original.id, &fields).await.unwrap(),
        UpdateResult::modified()
    );
    assert_eq!(
        store.replace_fields(original.id, &fields).await.unwrap(),
        UpdateResult::unchanged()
    );

    let updated = store.find_by_id(original.id).await.unwrap().unwrap();
    assert_eq!(updated.fields(), fields);
    assert_eq!(updated.seller_email, original.seller_email);
    assert_eq!(updated.created_at, original.created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_fields_upserts_missing_id(pool: PgPool) {
    let store = PgToyStore::new(pool);
    let id = new_toy_id();
    let fields = ToyFields {
        toy_name: Some("Ghost".into()),
        ..ToyFields::default()
    };

    assert_eq!(
        store.replace_fields(id, &fields).await.unwrap(),
        UpdateResult::upserted(id)
    );
    assert!(store.find_by_id(id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_twice_reports_zero_the_second_time(pool: PgPool) {
    let store = seeded(pool).await;
    let id = store.list_page(0, 1).await.unwrap()[0].id;

    assert_eq!(store.delete_by_id(id).await.unwrap().deleted_count, 1);
    assert_eq!(store.delete_by_id(id).await.unwrap().deleted_count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn fractional_quantity_round_trips(pool: PgPool) {
    let store = PgToyStore::new(pool);
    let mut input = new_toy("Marbles", Some(3.0), "classic", "mo@example.com");
    input.fields.quantity = Some(2.5);

    let id = store.insert(&input).await.unwrap().inserted_id;
    let toy = store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(toy.quantity, Some(2.5));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn seller_less_toys_are_listed_without_email(pool: PgPool) {
    let store = seeded(pool).await;
    let id = new_toy_id();
    let fields = ToyFields {
        toy_name: Some("Orphan".into()),
        ..ToyFields::default()
    };
    store.replace_fields(id, &fields).await.unwrap();

    let unowned = store.list_by_seller(None, PriceSort::Unsorted).await.unwrap();
    assert_eq!(unowned.len(), 1);
    assert_eq!(unowned[0].id, id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_upserts_of_missing_id_both_apply(pool: PgPool) {
    let store = PgToyStore::new(pool);
    let id = new_toy_id();
    let first = ToyFields {
        toy_name: Some("First".into()),
        ..ToyFields::default()
    };
    let second = ToyFields {
        toy_name: Some("Second".into()),
        ..ToyFields::default()
    };

    let (a, b) = tokio::join!(
        store.replace_fields(id, &first),
        store.replace_fields(id, &second)
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    // One write creates the toy, the other overwrites it.
    assert_eq!(a.upserted_count + b.upserted_count, 1);
    assert_eq!(a.modified_count + b.modified_count, 1);
    assert_eq!(store.count_all().await.unwrap(), 1);

    let stored = store.find_by_id(id).await.unwrap().unwrap();
    let winner = if a.upserted_count == 1 { &second } else { &first };
    assert_eq!(&stored.fields(), winner);
}
