pub mod classifier;
pub mod fallback;
pub mod huggingface;
pub mod normalizer;
pub mod parser;
pub mod policy;

use async_trait::async_trait;

use crate::models::{InferenceRequest, InferenceResult};

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("inference credential is not configured")]
    NotConfigured,

    #[error("inference call timed out")]
    Timeout,

    #[error("inference endpoint error: {0}")]
    Http(String),

    #[error("unexpected inference payload: {0}")]
    Malformed(String),
}

/// Boundary to the external model services. One call per invocation, no retries.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    async fn invoke(&self, request: &InferenceRequest<'_>) -> Result<InferenceResult, GatewayError>;
}
