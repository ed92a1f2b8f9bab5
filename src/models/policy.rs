use super::Intent;

/// System directive that conditions a generation call for one intent.
#[derive(Debug, PartialEq, Eq)]
pub struct Policy {
    pub intent: Intent,
    pub directive: &'static str,
}

impl Policy {
    /// The label every reply under this policy opens with, e.g. "Symptom Agent:".
    pub fn opening_label(&self) -> String {
        format!("{}:", self.intent.agent_name())
    }
}
