use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{DailyMetric, Hours, MetricValue, Millilitres};
use crate::services::store::MetricStore;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SeriesResponse<V: MetricValue> {
    pub success: bool,
    pub data: Vec<DailyMetric<V>>,
}

fn series<V: MetricValue>(store: &MetricStore<V>) -> Json<SeriesResponse<V>> {
    Json(SeriesResponse {
        success: true,
        data: store.all(),
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Date must be formatted as YYYY-MM-DD".to_string()))
}

#[derive(Deserialize)]
pub struct WaterUpdate {
    pub date: Option<String>,
    pub amount: Option<u32>,
}

// GET /api/water/week
pub async fn water_week(State(state): State<Arc<AppState>>) -> Json<Vec<DailyMetric<Millilitres>>> {
    Json(state.water.all())
}

// POST /api/water
pub async fn update_water(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WaterUpdate>, JsonRejection>,
) -> Result<Json<SeriesResponse<Millilitres>>, AppError> {
    let Json(payload) = payload?;
    let (Some(date), Some(amount)) = (payload.date, payload.amount) else {
        return Err(AppError::Validation(
            "Date and amount are required".to_string(),
        ));
    };
    let date = parse_date(&date)?;

    state.water.upsert(date, Millilitres(amount));
    tracing::debug!(%date, amount, "water intake recorded");
    Ok(series(&state.water))
}

// POST /api/water/reset
pub async fn reset_water(State(state): State<Arc<AppState>>) -> Json<SeriesResponse<Millilitres>> {
    state.water.reset(Utc::now().date_naive());
    series(&state.water)
}

#[derive(Deserialize)]
pub struct SleepUpdate {
    pub date: Option<String>,
    pub hours: Option<f64>,
}

// GET /api/sleep/week
pub async fn sleep_week(State(state): State<Arc<AppState>>) -> Json<Vec<DailyMetric<Hours>>> {
    Json(state.sleep.all())
}

// POST /api/sleep
pub async fn update_sleep(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SleepUpdate>, JsonRejection>,
) -> Result<Json<SeriesResponse<Hours>>, AppError> {
    let Json(payload) = payload?;
    let (Some(date), Some(hours)) = (payload.date, payload.hours) else {
        return Err(AppError::Validation(
            "Date and hours are required".to_string(),
        ));
    };
    if !hours.is_finite() || !(0.0..=24.0).contains(&hours) {
        return Err(AppError::Validation(
            "Hours must be between 0 and 24".to_string(),
        ));
    }
    let date = parse_date(&date)?;

    state.sleep.upsert(date, Hours(hours));
    tracing::debug!(%date, hours, "sleep recorded");
    Ok(series(&state.sleep))
}

// POST /api/sleep/reset
pub async fn reset_sleep(State(state): State<Arc<AppState>>) -> Json<SeriesResponse<Hours>> {
    state.sleep.reset(Utc::now().date_naive());
    series(&state.sleep)
}
