pub mod health;

use axum::{routing::get, Router};

use crate::records::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/notes",
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route(
            "/api/notes/:id",
            get(handlers::get_note)
                .put(handlers::update_note)
                .delete(handlers::delete_note),
        )
        .route(
            "/api/bookmarks",
            get(handlers::list_bookmarks).post(handlers::create_bookmark),
        )
        .route(
            "/api/bookmarks/:id",
            get(handlers::get_bookmark)
                .put(handlers::update_bookmark)
                .delete(handlers::delete_bookmark),
        )
        .with_state(state)
}
