use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::errors::AppError;
use crate::state::AppState;

pub async fn rate_limit(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    let client = client_address(&req);
    if !state.rate_limiter.check(&client) {
        tracing::warn!(client = %client, path = %req.uri().path(), "rate limit exceeded");
        return AppError::RateLimited.into_response();
    }
    next.run(req).await
}

/// First `x-forwarded-for` hop when behind a proxy, else the socket peer.
fn client_address(req: &Request) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
