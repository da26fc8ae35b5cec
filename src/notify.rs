use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use serde_json::json;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, instrument};

pub const DISCORD_API_URL: &str = "https://discord.com/api/v10";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Message request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Sending to channel {channel_id} failed with status {status}")]
    Status { channel_id: String, status: u16 },
}

/// Posts messages into chat channels outside of an interaction
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, channel_id: &str, content: &str) -> Result<(), NotifyError>;
}

pub struct DiscordClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl DiscordClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(DISCORD_API_URL, token)
    }

    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn message_endpoint(&self, channel_id: &str) -> String {
        format!(
            "{}/channels/{channel_id}/messages",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Notifier for DiscordClient {
    #[instrument(skip(self, content))]
    async fn send(&self, channel_id: &str, content: &str) -> Result<(), NotifyError> {
        info!("Sending message to channel");
        let response = self
            .client
            .post(self.message_endpoint(channel_id))
            .header(AUTHORIZATION, format!("Bot {}", self.token))
            .header(USER_AGENT, "DiscordBot")
            .json(&json!({ "content": content }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::Status {
                channel_id: channel_id.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}

/// Keeps sent messages in memory instead of posting them
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(channel_id, content)` pairs in send order
    pub async fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, channel_id: &str, content: &str) -> Result<(), NotifyError> {
        info!(channel_id, "Recording message");
        self.sent
            .lock()
            .await
            .push((channel_id.to_string(), content.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_endpoint_includes_channel() {
        let client = DiscordClient::new("token");
        assert_eq!(
            client.message_endpoint("123"),
            "https://discord.com/api/v10/channels/123/messages"
        );
    }

    #[tokio::test]
    async fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.send("1", "first").await.unwrap();
        notifier.send("2", "second").await.unwrap();

        assert_eq!(
            notifier.sent().await,
            vec![
                ("1".to_string(), "first".to_string()),
                ("2".to_string(), "second".to_string())
            ]
        );
    }
}
