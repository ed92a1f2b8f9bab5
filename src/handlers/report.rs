use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::ReportAnalysis;
use crate::services::extraction::{self, ensure_meaningful};
use crate::services::report;
use crate::state::AppState;

pub const MAX_REPORT_BYTES: usize = 10 * 1024 * 1024;
const REPORT_FIELD: &str = "report";

struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl Upload {
    fn mime_type(&self) -> String {
        self.content_type
            .clone()
            .filter(|c| !c.is_empty() && c != "application/octet-stream")
            .or_else(|| {
                self.file_name
                    .as_deref()
                    .and_then(|name| mime_guess::from_path(name).first())
                    .map(|m| m.essence_str().to_string())
            })
            .unwrap_or_else(|| "application/octet-stream".to_string())
    }
}

// POST /api/report/analyze
pub async fn analyze_upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ReportAnalysis>, AppError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some(REPORT_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        upload = Some(Upload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    let upload = upload.ok_or_else(|| AppError::Validation("No file uploaded.".to_string()))?;
    if upload.bytes.len() > MAX_REPORT_BYTES {
        return Err(AppError::Validation(
            "File exceeds the 10 MB upload limit.".to_string(),
        ));
    }

    let mime = upload.mime_type();
    tracing::info!(
        file = upload.file_name.as_deref().unwrap_or("-"),
        mime = %mime,
        bytes = upload.bytes.len(),
        "analysing uploaded report"
    );

    let text = extraction::extract(state.ocr.as_ref(), &upload.bytes, &mime)
        .await
        .map_err(|e| {
            if e.is_client_error() {
                AppError::Extraction(e)
            } else {
                AppError::internal(
                    "Failed to read the uploaded document.",
                    e,
                    state.config.is_development(),
                )
            }
        })?;
    Ok(Json(report::analyze_text(state.gateway.as_ref(), &text).await))
}

#[derive(Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: Option<String>,
}

// POST /api/analyzeReport
pub async fn analyze_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeTextRequest>, JsonRejection>,
) -> Result<Json<ReportAnalysis>, AppError> {
    let Json(payload) = payload?;
    let text = payload
        .text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("No text provided.".to_string()))?;
    let text = ensure_meaningful(text)?;

    Ok(Json(report::analyze_text(state.gateway.as_ref(), &text).await))
}
