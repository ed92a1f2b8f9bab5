use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{GatewayError, InferenceGateway};
use crate::config::AppConfig;
use crate::models::{EndpointKind, EntitySpan, InferenceRequest, InferenceResult};

pub struct HuggingFaceGateway {
    token: Option<String>,
    generation_url: String,
    summarization_url: String,
    ner_url: String,
    generation_timeout: Duration,
    analysis_timeout: Duration,
    client: reqwest::Client,
}

impl HuggingFaceGateway {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            token: config
                .has_inference_credential()
                .then(|| config.huggingface_token.trim().to_string()),
            generation_url: config.generation_url.clone(),
            summarization_url: config.summarization_url.clone(),
            ner_url: config.ner_url.clone(),
            generation_timeout: config.generation_timeout(),
            analysis_timeout: config.analysis_timeout(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, kind: EndpointKind) -> (&str, Duration) {
        match kind {
            EndpointKind::Generate => (&self.generation_url, self.generation_timeout),
            EndpointKind::Summarize => (&self.summarization_url, self.analysis_timeout),
            EndpointKind::ExtractEntities => (&self.ner_url, self.analysis_timeout),
        }
    }
}

#[async_trait]
impl InferenceGateway for HuggingFaceGateway {
    async fn invoke(&self, request: &InferenceRequest<'_>) -> Result<InferenceResult, GatewayError> {
        let token = self.token.as_deref().ok_or(GatewayError::NotConfigured)?;
        let (url, timeout) = self.endpoint(request.kind);
        let prompt = request.prompt();

        let body = match request.kind {
            EndpointKind::Generate => json!({
                "inputs": prompt,
                "parameters": {
                    "max_length": 150,
                    "temperature": 0.7,
                    "do_sample": true,
                    "return_full_text": false,
                },
            }),
            EndpointKind::Summarize => json!({
                "inputs": prompt,
                "parameters": {
                    "max_length": 150,
                    "min_length": 30,
                    "do_sample": false,
                },
            }),
            EndpointKind::ExtractEntities => json!({ "inputs": prompt }),
        };

        tracing::debug!(kind = request.kind.as_str(), url, "calling inference endpoint");

        let resp = self
            .client
            .post(url)
            .bearer_auth(token)
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.map_err(transport_error)?;
            return Err(GatewayError::Http(format!("{status}: {}", text.trim())));
        }

        let data: serde_json::Value = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else {
                GatewayError::Malformed(format!("response body is not JSON: {e}"))
            }
        })?;

        match request.kind {
            EndpointKind::Generate => parse_generation(&data, &prompt),
            EndpointKind::Summarize => parse_summary(&data),
            EndpointKind::ExtractEntities => parse_entities(data),
        }
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Http(e.to_string())
    }
}

fn parse_generation(data: &serde_json::Value, prompt: &str) -> Result<InferenceResult, GatewayError> {
    let generated = data[0]["generated_text"]
        .as_str()
        .or_else(|| data["generated_text"].as_str())
        .ok_or_else(|| GatewayError::Malformed("missing generated_text".to_string()))?;

    // Some models echo the prompt even with return_full_text=false
    let body = generated.replace(prompt, "").trim().to_string();
    if body.is_empty() {
        return Err(GatewayError::Malformed("empty generation".to_string()));
    }
    Ok(InferenceResult::Text { body })
}

fn parse_summary(data: &serde_json::Value) -> Result<InferenceResult, GatewayError> {
    data[0]["summary_text"]
        .as_str()
        .map(|s| InferenceResult::Summary {
            summary: s.trim().to_string(),
        })
        .ok_or_else(|| GatewayError::Malformed("missing summary_text".to_string()))
}

#[derive(Deserialize)]
struct RawEntity {
    #[serde(alias = "entity")]
    entity_group: String,
    word: String,
    #[serde(default)]
    start: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NerPayload {
    Nested(Vec<Vec<RawEntity>>),
    Flat(Vec<RawEntity>),
}

fn parse_entities(data: serde_json::Value) -> Result<InferenceResult, GatewayError> {
    let payload: NerPayload = serde_json::from_value(data)
        .map_err(|e| GatewayError::Malformed(format!("entity list: {e}")))?;

    let to_spans = |segment: Vec<RawEntity>| -> Vec<EntitySpan> {
        segment
            .into_iter()
            .map(|e| EntitySpan {
                text: e.word,
                category: e.entity_group,
                start_offset: e.start,
            })
            .collect()
    };

    let segments = match payload {
        NerPayload::Nested(segments) => segments.into_iter().map(to_spans).collect(),
        NerPayload::Flat(segment) => vec![to_spans(segment)],
    };
    Ok(InferenceResult::Entities(segments))
}
