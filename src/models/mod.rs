pub mod answer;
pub mod chat;
pub mod emergency;
pub mod inference;
pub mod intent;
pub mod metric;
pub mod policy;
pub mod report;

pub use answer::{ChatAnswer, Urgency, UrgencyLevel};
pub use chat::{ChatTurn, ReplySource};
pub use emergency::{EmergencyAlert, Location};
pub use inference::{
    EndpointKind, GenerationOutput, InferenceRequest, InferenceResult, ResponseShape,
};
pub use intent::Intent;
pub use metric::{DailyMetric, Hours, MetricValue, Millilitres};
pub use policy::Policy;
pub use report::{EntitySpan, ReportAnalysis};
