use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{ChatAnswer, GenerationOutput, ReplySource};
use crate::services::ai::parser;
use crate::services::symptom;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomRequest {
    pub user_input: Option<String>,
}

#[derive(Serialize)]
pub struct SymptomResponse {
    pub answer: String,
    pub analysis: ChatAnswer,
    pub source: ReplySource,
}

// POST /api/analyze-symptom
pub async fn analyze_symptom(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SymptomRequest>, JsonRejection>,
) -> Result<Json<SymptomResponse>, AppError> {
    let Json(payload) = payload?;
    let input = payload
        .user_input
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Symptom input is required".to_string()))?;

    let (output, source) = symptom::analyze(state.gateway.as_ref(), &input).await;
    let (answer, analysis) = match output {
        GenerationOutput::Sectioned { raw, answer } => (raw, answer),
        other => {
            let raw = other.text();
            let answer = parser::parse(&raw);
            (raw, answer)
        }
    };

    Ok(Json(SymptomResponse {
        answer,
        analysis,
        source,
    }))
}
