use crate::calendar::MonthCursor;
use crate::errors::AppError;
use crate::models::{
    Habit, HabitForm, HabitId, HistoryQuery, HistoryResponse, TodayResponse, ToggleResponse,
};
use crate::state::AppState;
use crate::tracker;
use crate::ui::{render_index, render_not_found};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
};
use chrono::{Local, NaiveDate};

pub async fn index() -> Html<String> {
    Html(render_index(today()))
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(render_not_found()))
}

pub async fn get_today() -> Json<TodayResponse> {
    Json(TodayResponse {
        date: today().to_string(),
    })
}

pub async fn list_habits(State(state): State<AppState>) -> Result<Json<Vec<Habit>>, AppError> {
    Ok(Json(tracker::refresh(&state, today()).await?))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<HabitForm>,
) -> Result<(StatusCode, Json<Habit>), AppError> {
    let draft = payload
        .into_draft()
        .ok_or_else(|| AppError::bad_request("name must not be empty"))?;
    let habit = tracker::create(&state, &draft, today()).await?;
    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn update_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<HabitForm>,
) -> Result<Json<Habit>, AppError> {
    let draft = payload
        .into_draft()
        .ok_or_else(|| AppError::bad_request("name must not be empty"))?;
    let habit = tracker::update(&state, &HabitId::new(id), &draft, today()).await?;
    Ok(Json(habit))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    tracker::delete(&state, &HabitId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResponse>, AppError> {
    let outcome = tracker::toggle_today(&state, &HabitId::new(id), today()).await?;
    Ok(Json(outcome))
}

pub async fn habit_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let today = today();
    let month = match query.month.as_deref() {
        Some(value) => MonthCursor::parse(value)
            .ok_or_else(|| AppError::bad_request("month must look like YYYY-MM"))?,
        None => MonthCursor::containing(today),
    };

    let history = tracker::history(&state, &HabitId::new(id), month, today).await?;
    Ok(Json(history))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
