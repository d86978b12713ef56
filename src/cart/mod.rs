pub mod handlers;
pub mod repo;
pub mod shopping_list;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/recipes/download_shopping_cart",
            get(handlers::download_shopping_cart),
        )
        .route(
            "/recipes/:id/shopping_cart",
            post(handlers::add_to_cart).delete(handlers::remove_from_cart),
        )
}
