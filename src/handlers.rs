use crate::chart;
use crate::config::DEFAULT_SHOW_DAYS;
use crate::errors::AppError;
use crate::models::{
    ChartPayload, DateRange, NotesResponse, PointRequest, RefreshRequest, SelectionRequest,
};
use crate::normalize::{date_key, parse_day};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use chrono::{Duration, Local};
use tracing::{error, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let to = Local::now().date_naive();
    let from = to - Duration::days(DEFAULT_SHOW_DAYS);
    Html(render_index(
        &date_key(from),
        &date_key(to),
        state.config.default_user,
    ))
}

pub async fn get_chart(State(state): State<AppState>) -> Json<ChartPayload> {
    let session = state.session.lock().await;
    Json(session.payload())
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<ChartPayload>, AppError> {
    let (from_raw, to_raw) = match (&request.date_from, &request.date_to) {
        (Some(from), Some(to)) => (from, to),
        _ => return Err(AppError::bad_request("select both dates")),
    };
    let from = parse_day(from_raw).ok_or_else(|| AppError::bad_request("unreadable date_from"))?;
    let to = parse_day(to_raw).ok_or_else(|| AppError::bad_request("unreadable date_to"))?;
    if from > to {
        return Err(AppError::bad_request("date range is inverted"));
    }
    let range = DateRange { from, to };

    let user = request
        .user
        .or(state.config.default_user)
        .ok_or_else(|| AppError::bad_request("user not found"))?;

    // One refresh at a time; the selection and note endpoints stay live.
    let Ok(_gate) = state.refresh_gate.try_lock() else {
        return Err(AppError::conflict("refresh already in flight"));
    };

    info!("refreshing statistics for user {user}, {from} to {to}");
    let bundle = state.client.fetch_all(user, &range).await.map_err(|err| {
        error!("refresh failed: {err}");
        AppError::bad_gateway("failed to load statistics")
    })?;

    let mut session = state.session.lock().await;
    session.apply_fetch(range, &bundle);
    info!(
        "rebuilt chart: {} records, {} types",
        session.records.len(),
        session.catalog.len()
    );
    Ok(Json(session.payload()))
}

pub async fn set_selection(
    State(state): State<AppState>,
    Json(request): Json<SelectionRequest>,
) -> Json<ChartPayload> {
    let mut session = state.session.lock().await;
    session.set_selection(request.type_ids);
    Json(session.payload())
}

pub async fn point_notes(
    State(state): State<AppState>,
    Json(request): Json<PointRequest>,
) -> Json<NotesResponse> {
    let session = state.session.lock().await;
    let date = session
        .chart
        .as_ref()
        .and_then(|model| chart::point_date(model, request.series, request.point))
        .map(str::to_string);
    let notes = match &date {
        Some(key) => chart::notes_for(&session.notes, key).to_vec(),
        None => Vec::new(),
    };
    Json(NotesResponse { date, notes })
}

pub async fn day_notes(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Json<NotesResponse> {
    let session = state.session.lock().await;
    let notes = chart::notes_for(&session.notes, &date).to_vec();
    Json(NotesResponse {
        date: Some(date),
        notes,
    })
}
