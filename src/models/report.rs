use serde::{Deserialize, Serialize};

/// A tagged substring returned by named-entity recognition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntitySpan {
    pub text: String,
    pub category: String,
    pub start_offset: Option<usize>,
}

impl EntitySpan {
    pub fn new(text: &str, category: &str) -> Self {
        Self {
            text: text.to_string(),
            category: category.to_string(),
            start_offset: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportAnalysis {
    pub summary: String,
    pub medicines: Vec<String>,
    pub warning_count: usize,
    pub char_count: usize,
    #[serde(default)]
    pub degraded: bool,
}
