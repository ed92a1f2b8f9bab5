use crate::models::{InferenceRequest, InferenceResult, ReportAnalysis};
use crate::services::ai::normalizer::{degraded, normalize};
use crate::services::ai::{GatewayError, InferenceGateway};

const UNAVAILABLE: &str = "AI analysis is not available due to configuration issues.";
const FAILED: &str = "Failed to analyze the report due to a service error.";

/// Summarises extracted report text and lists the medicines it mentions.
/// Never fails: upstream problems produce a degraded analysis.
pub async fn analyze_text(gateway: &dyn InferenceGateway, text: &str) -> ReportAnalysis {
    let summarize = InferenceRequest::summarize(text);
    let entities = InferenceRequest::extract_entities(text);

    let joined = tokio::try_join!(gateway.invoke(&summarize), gateway.invoke(&entities));

    let outcome = joined.and_then(|results| match results {
        (InferenceResult::Summary { summary }, InferenceResult::Entities(segments)) => {
            Ok(normalize(summary, segments, text))
        }
        (summary, entities) => Err(GatewayError::Malformed(format!(
            "expected summary and entities, got {} and {}",
            summary.kind().as_str(),
            entities.kind().as_str()
        ))),
    });

    match outcome {
        Ok(analysis) => {
            tracing::info!(
                medicines = analysis.medicines.len(),
                warnings = analysis.warning_count,
                "report analysed"
            );
            analysis
        }
        Err(GatewayError::NotConfigured) => {
            tracing::warn!("inference credential missing, returning degraded analysis");
            degraded(UNAVAILABLE, text)
        }
        Err(e) => {
            tracing::warn!(error = %e, "report analysis failed, returning degraded analysis");
            degraded(FAILED, text)
        }
    }
}
