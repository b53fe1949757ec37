//! Outbound mail. Delivery is best-effort: callers log a failed send and move on.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

use crate::config::MailConfig;

#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<(), String>;
}

/// Pick a mailer for the configured environment. An empty API URL means
/// no mail infrastructure is available and messages are only logged.
pub fn from_config(config: &MailConfig) -> Arc<dyn Mailer> {
    if config.api_url.is_empty() {
        Arc::new(NullMailer)
    } else {
        Arc::new(HttpMailer::new(
            config.api_url.clone(),
            config.api_key.clone(),
            config.from_address.clone(),
        ))
    }
}

/// Sends mail through an HTTP mail API (JSON POST).
pub struct HttpMailer {
    api_url: String,
    api_key: String,
    from_address: String,
    client: Client,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String, from_address: String) -> Self {
        Self {
            api_url,
            api_key,
            from_address,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), String> {
        let payload = serde_json::json!({
            "from": self.from_address,
            "to": message.to,
            "subject": message.subject,
            "text": message.body,
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("Mail request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Mail API returned {}", response.status()));
        }
        Ok(())
    }
}

/// Logs messages instead of delivering them.
pub struct NullMailer;

#[async_trait]
impl Mailer for NullMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), String> {
        info!(
            "Mail delivery disabled; would send '{}' to {}",
            message.subject, message.to
        );
        Ok(())
    }
}

/// Captures messages in memory so tests can assert on what was sent.
#[cfg(test)]
pub struct RecordingMailer {
    pub sent: std::sync::Mutex<Vec<MailMessage>>,
    fail: bool,
}

#[cfg(test)]
impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            sent: std::sync::Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A mailer whose every send fails, simulating an outage.
    pub fn failing() -> Self {
        Self {
            sent: std::sync::Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[cfg(test)]
#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), String> {
        if self.fail {
            return Err("simulated mail outage".to_string());
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_mailer_always_succeeds() {
        let mailer = NullMailer;
        let message = MailMessage {
            to: "alice@example.com".to_string(),
            subject: "Password Reset Request".to_string(),
            body: "link".to_string(),
        };
        assert!(mailer.send(&message).await.is_ok());
    }

    #[test]
    fn test_from_config_without_api_url_logs_only() {
        let config = MailConfig {
            api_url: String::new(),
            api_key: String::new(),
            from_address: "no-reply@example.com".to_string(),
            reset_password_url: "https://example.com/reset".to_string(),
        };
        // Just checks the selection compiles and returns a usable mailer.
        let _mailer = from_config(&config);
    }
}
