use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Utc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use healthchat::config::AppConfig;
use healthchat::handlers;
use healthchat::services::ai::huggingface::HuggingFaceGateway;
use healthchat::services::extraction::ocr::TesseractCli;
use healthchat::services::messaging::log::LogSmsProvider;
use healthchat::services::messaging::twilio::TwilioSmsProvider;
use healthchat::services::messaging::MessagingProvider;
use healthchat::services::rate_limit::RateLimiter;
use healthchat::services::store::MetricStore;
use healthchat::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    if !config.has_inference_credential() {
        tracing::warn!("HUGGINGFACE_TOKEN not set, AI answers will use built-in fallbacks");
    }
    let gateway = HuggingFaceGateway::from_config(&config);

    let messaging: Box<dyn MessagingProvider> = if config.has_twilio() {
        tracing::info!("using Twilio SMS provider");
        Box::new(TwilioSmsProvider::new(
            config.twilio_account_sid.clone(),
            config.twilio_auth_token.clone(),
            config.twilio_phone_number.clone(),
        ))
    } else {
        tracing::warn!("Twilio not configured, emergency alerts will only be logged");
        Box::new(LogSmsProvider)
    };
    if config.emergency_contacts.is_empty() {
        tracing::warn!("no emergency contacts configured");
    }

    let ocr = TesseractCli::new(config.tesseract_path.clone(), config.ocr_language.clone());
    let today = Utc::now().date_naive();

    let state = Arc::new(AppState {
        config: config.clone(),
        gateway: Box::new(gateway),
        messaging,
        ocr: Box::new(ocr),
        water: MetricStore::seeded(today),
        sleep: MetricStore::seeded(today),
        rate_limiter: RateLimiter::per_minute(config.rate_limit_per_minute),
    });

    let app = handlers::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(env = %config.app_env, "starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
