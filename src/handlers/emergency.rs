use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::Location;
use crate::services::emergency;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LocationInput {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl LocationInput {
    fn validate(&self) -> Result<Location, AppError> {
        let (Some(lat), Some(lng)) = (self.lat, self.lng) else {
            return Err(AppError::Validation(
                "Location coordinates are required".to_string(),
            ));
        };
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(AppError::Validation(
                "Location coordinates are out of range".to_string(),
            ));
        }
        Ok(Location { lat, lng })
    }
}

#[derive(Deserialize)]
pub struct EmergencyRequest {
    pub location: Option<LocationInput>,
    pub user: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub contacts_notified: usize,
    pub location: Location,
}

// POST /api/emergency/trigger
pub async fn trigger(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EmergencyRequest>, JsonRejection>,
) -> Result<Json<EmergencyResponse>, AppError> {
    let Json(payload) = payload?;
    let location = payload
        .location
        .as_ref()
        .ok_or_else(|| AppError::Validation("Location coordinates are required".to_string()))?
        .validate()?;
    let user = payload
        .user
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::Validation("User information is required".to_string()))?;

    let alert = emergency::trigger(
        state.messaging.as_ref(),
        &state.config.emergency_contacts,
        &user,
        location,
    )
    .await?;

    Ok(Json(EmergencyResponse {
        status: "alert_sent",
        message: "Emergency alerts sent successfully",
        contacts_notified: alert.contacts_notified,
        location: alert.location,
    }))
}

// GET /api/emergency/health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "emergency",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
