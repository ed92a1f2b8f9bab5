use crate::models::{GenerationOutput, InferenceRequest, InferenceResult, ReplySource, ResponseShape};
use crate::services::ai::policy::symptom_analysis_prompt;
use crate::services::ai::{fallback, parser, InferenceGateway};
use crate::services::chat::shape_output;

/// Sectioned symptom analysis. Model output that does not follow the four-section
/// layout is discarded in favour of the fallback, so callers always get that layout.
pub async fn analyze(gateway: &dyn InferenceGateway, input: &str) -> (GenerationOutput, ReplySource) {
    let prompt = symptom_analysis_prompt(input);

    let generated = match gateway.invoke(&InferenceRequest::generate(&prompt, None)).await {
        Ok(InferenceResult::Text { body }) if parser::is_sectioned(&body) => Some(body),
        Ok(_) => {
            tracing::warn!("model answer is not sectioned, using fallback analysis");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "symptom analysis failed, using fallback analysis");
            None
        }
    };

    match generated {
        Some(body) => (shape_output(body, ResponseShape::Sectioned), ReplySource::Model),
        None => (
            shape_output(fallback::symptom_analysis(input), ResponseShape::Sectioned),
            ReplySource::Fallback,
        ),
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::models::UrgencyLevel;
    use crate::services::ai::GatewayError;

    struct FixedGateway(Result<&'static str, ()>);

    #[async_trait]
    impl InferenceGateway for FixedGateway {
        async fn invoke(
            &self,
            _request: &InferenceRequest<'_>,
        ) -> Result<InferenceResult, GatewayError> {
            self.0
                .map(|body| InferenceResult::Text {
                    body: body.to_string(),
                })
                .map_err(|_| GatewayError::NotConfigured)
        }
    }

    #[tokio::test]
    async fn test_sectioned_model_answer_is_used() {
        let body = "1. 🔍 Possible Causes:\n- Allergy\n2. ⚠️ Urgency Level: Moderate\n3. 🏠 Home Remedies or Tips:\n- Antihistamine\n4. 🏥 When to See a Doctor: If swelling spreads.";
        let (output, source) = analyze(&FixedGateway(Ok(body)), "itchy rash").await;
        assert_eq!(source, ReplySource::Model);
        match output {
            GenerationOutput::Sectioned { raw, answer } => {
                assert_eq!(raw, body);
                assert_eq!(answer.possible_causes, vec!["Allergy"]);
                assert_eq!(answer.urgency.level, UrgencyLevel::Moderate);
            }
            other => panic!("expected sectioned, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_free_text_answer_falls_back() {
        let (output, source) =
            analyze(&FixedGateway(Ok("You should rest.")), "high fever").await;
        assert_eq!(source, ReplySource::Fallback);
        assert!(parser::is_sectioned(&output.text()));
    }

    #[tokio::test]
    async fn test_gateway_error_falls_back() {
        let (output, source) = analyze(&FixedGateway(Err(())), "chest pain").await;
        assert_eq!(source, ReplySource::Fallback);
        match output {
            GenerationOutput::Sectioned { answer, .. } => {
                assert_eq!(answer.urgency.level, UrgencyLevel::Critical)
            }
            other => panic!("expected sectioned, got {other:?}"),
        }
    }
}
