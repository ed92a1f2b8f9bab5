use async_trait::async_trait;

use super::MessagingProvider;

/// Stand-in used when no SMS gateway is configured; delivery is only logged.
pub struct LogSmsProvider;

#[async_trait]
impl MessagingProvider for LogSmsProvider {
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<String> {
        let id = format!("msg_{}", uuid::Uuid::new_v4().simple());
        tracing::info!(to, id = %id, body, "SMS (not delivered, no gateway configured)");
        Ok(id)
    }
}
