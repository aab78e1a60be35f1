//! Handlers for the toy collection.
//!
//! Each handler performs exactly one store call. Paths keep the storefront's
//! historical names (`/allToys`, `/myToys/{id}`, ...).

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use toybox_core::error::CoreError;
use toybox_core::listing::{CATEGORY_TOYS_LIMIT, FEATURED_TOYS_LIMIT};
use toybox_core::types::parse_toy_id;
use toybox_db::models::toy::{DeleteResult, InsertOneResult, NewToy, Toy, ToyFields, UpdateResult};

use crate::error::{AppError, AppResult};
use crate::query::{PageParams, SellerParams};
use crate::state::AppState;

/// Body of `GET /totalToys`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalToys {
    pub total_toys: i64,
}

/// GET /allToys?page=&limit=
pub async fn list_page(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Vec<Toy>>> {
    let window = params.window();
    let toys = state.store.list_page(window.skip, window.limit).await?;
    Ok(Json(toys))
}

/// GET /totalToys
pub async fn total(State(state): State<AppState>) -> AppResult<Json<TotalToys>> {
    let total_toys = state.store.count_all().await?;
    Ok(Json(TotalToys { total_toys }))
}

/// GET /featuredToys
pub async fn featured(State(state): State<AppState>) -> AppResult<Json<Vec<Toy>>> {
    let toys = state.store.top_by_price(FEATURED_TOYS_LIMIT).await?;
    Ok(Json(toys))
}

/// GET /myToys?email=&sortToy=
///
/// Without an `email` this lists the toys that have no seller.
pub async fn list_by_seller(
    State(state): State<AppState>,
    Query(params): Query<SellerParams>,
) -> AppResult<Json<Vec<Toy>>> {
    let toys = state
        .store
        .list_by_seller(params.email.as_deref(), params.sort())
        .await?;
    Ok(Json(toys))
}

/// GET /searchToys/{search}
pub async fn search(
    State(state): State<AppState>,
    Path(search): Path<String>,
) -> AppResult<Json<Vec<Toy>>> {
    tracing::debug!(%search, "Searching toys by name");
    let toys = state.store.search_by_name(&search).await?;
    Ok(Json(toys))
}

/// GET /shopByCategory/{category}
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Toy>>> {
    let toys = state
        .store
        .list_by_category(Some(&category), CATEGORY_TOYS_LIMIT)
        .await?;
    Ok(Json(toys))
}

/// GET /shopByCategory
///
/// No category selected: the first toys of the whole collection.
pub async fn list_any_category(State(state): State<AppState>) -> AppResult<Json<Vec<Toy>>> {
    let toys = state
        .store
        .list_by_category(None, CATEGORY_TOYS_LIMIT)
        .await?;
    Ok(Json(toys))
}

/// GET /viewDetails/{id} and GET /updateToy/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Toy>> {
    let id = parse_toy_id(&raw_id)?;
    let toy = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Toy",
            id: id.to_string(),
        }))?;
    Ok(Json(toy))
}

/// POST /addToys
///
/// Answers 200 with the insert result, as existing storefront clients expect.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewToy>,
) -> AppResult<Json<InsertOneResult>> {
    let result = state.store.insert(&input).await?;
    tracing::info!(id = %result.inserted_id, "Toy added");
    Ok(Json(result))
}

/// PUT /updateToy/{id}
///
/// Replaces every display field; creates the toy if the id is unknown.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(fields): Json<ToyFields>,
) -> AppResult<Json<UpdateResult>> {
    let id = parse_toy_id(&raw_id)?;
    let result = state.store.replace_fields(id, &fields).await?;
    Ok(Json(result))
}

/// DELETE /myToys/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DeleteResult>> {
    let id = parse_toy_id(&raw_id)?;
    let result = state.store.delete_by_id(id).await?;
    Ok(Json(result))
}
