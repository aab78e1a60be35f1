//! Route definitions for the toy collection.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::toy;
use crate::state::AppState;

/// Toy routes, mounted at the root to keep the storefront's existing paths.
///
/// ```text
/// GET    /allToys?page=&limit=          -> list_page
/// GET    /totalToys                     -> total
/// GET    /featuredToys                  -> featured
/// GET    /myToys?email=&sortToy=        -> list_by_seller
/// DELETE /myToys/{id}                   -> delete
/// GET    /searchToys/{search}           -> search
/// GET    /shopByCategory                -> list_any_category
/// GET    /shopByCategory/{category}     -> list_by_category
/// GET    /viewDetails/{id}              -> get_by_id
/// GET    /updateToy/{id}                -> get_by_id
/// PUT    /updateToy/{id}                -> update
/// POST   /addToys                       -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/allToys", get(toy::list_page))
        .route("/totalToys", get(toy::total))
        .route("/featuredToys", get(toy::featured))
        .route("/myToys", get(toy::list_by_seller))
        .route("/myToys/{id}", delete(toy::delete))
        .route("/searchToys/{search}", get(toy::search))
        .route("/shopByCategory", get(toy::list_any_category))
        .route("/shopByCategory/", get(toy::list_any_category))
        .route("/shopByCategory/{category}", get(toy::list_by_category))
        .route("/viewDetails/{id}", get(toy::get_by_id))
        .route("/updateToy/{id}", get(toy::get_by_id).put(toy::update))
        .route("/addToys", post(toy::create))
}
