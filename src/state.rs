use crate::config::AppConfig;
use crate::models::{Hours, Millilitres};
use crate::services::ai::InferenceGateway;
use crate::services::extraction::ocr::OcrEngine;
use crate::services::messaging::MessagingProvider;
use crate::services::rate_limit::RateLimiter;
use crate::services::store::MetricStore;

pub struct AppState {
    pub config: AppConfig,
    pub gateway: Box<dyn InferenceGateway>,
    pub messaging: Box<dyn MessagingProvider>,
    pub ocr: Box<dyn OcrEngine>,
    pub water: MetricStore<Millilitres>,
    pub sleep: MetricStore<Hours>,
    pub rate_limiter: RateLimiter,
}
