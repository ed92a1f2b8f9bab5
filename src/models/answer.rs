use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UrgencyLevel {
    Critical,
    Moderate,
    Mild,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Urgency {
    pub level: UrgencyLevel,
    pub description: String,
}

/// Structured form of a sectioned symptom answer. Every field is always populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatAnswer {
    pub possible_causes: Vec<String>,
    pub urgency: Urgency,
    pub home_remedies: Vec<String>,
    pub when_to_visit_doctor: String,
}
