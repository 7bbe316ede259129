use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/tap", post(handlers::tap))
        .route("/api/counter", get(handlers::get_counter))
        .route("/api/increment", post(handlers::increment))
        .route("/api/reset", post(handlers::reset))
        .route("/api/count", put(handlers::set_count))
        .route("/api/history", delete(handlers::clear_history))
        .route("/api/history/:index", delete(handlers::delete_history_item))
        .with_state(state)
}
