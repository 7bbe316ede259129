use crate::errors::AppError;
use crate::models::{CounterRecord, SetCountRequest};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{Html, Redirect},
};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    Html(render_index(store.record()))
}

pub async fn get_counter(State(state): State<AppState>) -> Json<CounterRecord> {
    let store = state.store.lock().await;
    Json(store.record().clone())
}

pub async fn increment(State(state): State<AppState>) -> Json<CounterRecord> {
    let mut store = state.store.lock().await;
    store.increment();
    Json(store.record().clone())
}

pub async fn reset(State(state): State<AppState>) -> Json<CounterRecord> {
    let mut store = state.store.lock().await;
    store.reset_count();
    info!("count reset");
    Json(store.record().clone())
}

pub async fn set_count(
    State(state): State<AppState>,
    payload: Result<Json<SetCountRequest>, JsonRejection>,
) -> Result<Json<CounterRecord>, AppError> {
    let Json(payload) =
        payload.map_err(|_| AppError::bad_request("count must be a non-negative integer"))?;

    let mut store = state.store.lock().await;
    store.set_count(payload.count);
    Ok(Json(store.record().clone()))
}

pub async fn delete_history_item(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Json<CounterRecord> {
    let mut store = state.store.lock().await;
    if let Some(entry) = store.delete_history_item(index) {
        info!("deleted history entry for {}", entry.date);
    }
    Json(store.record().clone())
}

pub async fn clear_history(State(state): State<AppState>) -> Json<CounterRecord> {
    let mut store = state.store.lock().await;
    store.clear_all_history();
    info!("history cleared");
    Json(store.record().clone())
}

pub async fn tap(State(state): State<AppState>) -> Redirect {
    state.store.lock().await.increment();
    Redirect::to("/")
}
