use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Emergency,
    Symptom,
    Nutrition,
    Wellness,
}

impl Intent {
    pub const ALL: [Intent; 4] = [
        Intent::Emergency,
        Intent::Symptom,
        Intent::Nutrition,
        Intent::Wellness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Emergency => "emergency",
            Intent::Symptom => "symptom",
            Intent::Nutrition => "nutrition",
            Intent::Wellness => "wellness",
        }
    }

    /// Unknown keys are rejected rather than mapped to a default agent.
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "emergency" => Some(Intent::Emergency),
            "symptom" => Some(Intent::Symptom),
            "nutrition" => Some(Intent::Nutrition),
            "wellness" => Some(Intent::Wellness),
            _ => None,
        }
    }

    pub fn agent_name(&self) -> &'static str {
        match self {
            Intent::Emergency => "Emergency Agent",
            Intent::Symptom => "Symptom Agent",
            Intent::Nutrition => "Nutrition Agent",
            Intent::Wellness => "Wellness Agent",
        }
    }
}
