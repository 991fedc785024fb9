use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/chart", get(handlers::get_chart))
        .route("/api/refresh", post(handlers::refresh))
        .route("/api/selection", post(handlers::set_selection))
        .route("/api/point", post(handlers::point_notes))
        .route("/api/notes/:date", get(handlers::day_notes))
        .with_state(state)
}
