pub mod log;
pub mod twilio;

use async_trait::async_trait;

#[async_trait]
pub trait MessagingProvider: Send + Sync {
    /// Sends one SMS and returns the provider's message id.
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<String>;
}
