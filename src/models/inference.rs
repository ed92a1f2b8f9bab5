use super::{ChatAnswer, EntitySpan, Policy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Generate,
    Summarize,
    ExtractEntities,
}

impl EndpointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointKind::Generate => "generate",
            EndpointKind::Summarize => "summarize",
            EndpointKind::ExtractEntities => "extract_entities",
        }
    }
}

/// One outbound call. Built per request, never retained.
#[derive(Debug)]
pub struct InferenceRequest<'a> {
    pub kind: EndpointKind,
    pub payload: &'a str,
    pub policy: Option<&'static Policy>,
}

impl<'a> InferenceRequest<'a> {
    pub fn generate(payload: &'a str, policy: Option<&'static Policy>) -> Self {
        Self {
            kind: EndpointKind::Generate,
            payload,
            policy,
        }
    }

    pub fn summarize(payload: &'a str) -> Self {
        Self {
            kind: EndpointKind::Summarize,
            payload,
            policy: None,
        }
    }

    pub fn extract_entities(payload: &'a str) -> Self {
        Self {
            kind: EndpointKind::ExtractEntities,
            payload,
            policy: None,
        }
    }

    /// Text sent upstream: the policy directive, if any, followed by the payload.
    pub fn prompt(&self) -> String {
        match self.policy {
            Some(policy) => format!("{}\n\n{}", policy.directive, self.payload),
            None => self.payload.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InferenceResult {
    Text { body: String },
    Summary { summary: String },
    /// Entity spans grouped per input segment, as the upstream model returns them.
    Entities(Vec<Vec<EntitySpan>>),
}

impl InferenceResult {
    pub fn kind(&self) -> EndpointKind {
        match self {
            InferenceResult::Text { .. } => EndpointKind::Generate,
            InferenceResult::Summary { .. } => EndpointKind::Summarize,
            InferenceResult::Entities(_) => EndpointKind::ExtractEntities,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Text,
    Stream,
    Sectioned,
}

/// A generated reply in the shape the caller asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutput {
    Text(String),
    Stream(Vec<String>),
    Sectioned { raw: String, answer: ChatAnswer },
}

impl GenerationOutput {
    pub fn text(&self) -> String {
        match self {
            GenerationOutput::Text(body) => body.clone(),
            GenerationOutput::Stream(tokens) => tokens.concat(),
            GenerationOutput::Sectioned { raw, .. } => raw.clone(),
        }
    }
}
