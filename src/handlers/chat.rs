use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::sse::{Event, Sse};
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio_stream::Stream;

use crate::errors::AppError;
use crate::models::{ChatTurn, GenerationOutput, Intent, ReplySource, ResponseShape};
use crate::services::chat;
use crate::state::AppState;

const MESSAGE_REQUIRED: &str = "Message is required and must be a string";

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub messages: Option<Vec<ChatTurn>>,
}

impl ChatRequest {
    /// Splits the request into earlier turns and the message to answer.
    fn into_turns(self) -> Result<(Vec<ChatTurn>, String), AppError> {
        let mut history = self.messages.unwrap_or_default();

        if let Some(message) = self.message {
            if message.trim().is_empty() {
                return Err(AppError::Validation(MESSAGE_REQUIRED.to_string()));
            }
            return Ok((history, message));
        }

        let last_user = history
            .iter()
            .rposition(ChatTurn::is_user)
            .ok_or_else(|| AppError::Validation("No messages provided".to_string()))?;
        let latest = history.remove(last_user);
        history.truncate(last_user);

        if latest.content.trim().is_empty() {
            return Err(AppError::Validation(MESSAGE_REQUIRED.to_string()));
        }
        Ok((history, latest.content))
    }
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub agent: Intent,
    pub source: ReplySource,
    pub timestamp: String,
}

// POST /api/chat
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload?;
    let (history, message) = payload.into_turns()?;

    let reply = chat::respond(
        state.gateway.as_ref(),
        &history,
        &message,
        None,
        ResponseShape::Text,
    )
    .await;

    Ok(Json(ChatResponse {
        response: reply.output.text(),
        agent: reply.agent,
        source: reply.source,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

#[derive(Deserialize)]
pub struct AgentChatRequest {
    pub message: Option<String>,
    pub agent: Option<String>,
}

#[derive(Serialize)]
pub struct AgentChatResponse {
    pub agent: Intent,
    pub response: String,
    pub message: String,
    pub source: ReplySource,
    pub timestamp: String,
}

// POST /api/chat/agent
pub async fn chat_with_agent(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AgentChatRequest>, JsonRejection>,
) -> Result<Json<AgentChatResponse>, AppError> {
    let Json(payload) = payload?;
    let (Some(message), Some(agent)) = (
        payload.message.filter(|m| !m.trim().is_empty()),
        payload.agent,
    ) else {
        return Err(AppError::Validation(
            "Message and agent are required".to_string(),
        ));
    };
    let agent = Intent::from_key(&agent)
        .ok_or_else(|| AppError::Validation("Invalid agent specified".to_string()))?;

    let reply = chat::respond(
        state.gateway.as_ref(),
        &[],
        &message,
        Some(agent),
        ResponseShape::Text,
    )
    .await;
    let text = reply.output.text();

    Ok(Json(AgentChatResponse {
        agent: reply.agent,
        response: text.clone(),
        message: text,
        source: reply.source,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

// POST /api/chat/stream
pub async fn chat_stream(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let Json(payload) = payload?;
    let (history, message) = payload.into_turns()?;

    let reply = chat::respond(
        state.gateway.as_ref(),
        &history,
        &message,
        None,
        ResponseShape::Stream,
    )
    .await;

    let tokens = match reply.output {
        GenerationOutput::Stream(tokens) => tokens,
        other => vec![other.text()],
    };
    let done = Event::default().event("done").data(reply.agent.as_str());
    let events = tokens
        .into_iter()
        .map(|token| Event::default().data(token.replace('\r', "")))
        .chain(std::iter::once(done))
        .map(Ok);

    Ok(Sse::new(tokio_stream::iter(events)))
}
