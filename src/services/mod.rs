pub mod ai;
pub mod chat;
pub mod emergency;
pub mod extraction;
pub mod messaging;
pub mod rate_limit;
pub mod report;
pub mod store;
pub mod symptom;
