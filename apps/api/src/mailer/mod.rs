//! Delivery channel for rendered presentations.
//!
//! `Mailer` is trait-based so the dispatch step can be swapped without touching
//! the send pipeline. Default backend: Resend HTTP API.
//!
//! Delivery is a single attempt with an explicit outcome — retry policy, if any,
//! belongs to the caller, and the send pipeline deliberately has none.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error (status {status}): {message}")]
    Provider { status: u16, message: String },
}

/// A fully assembled outbound message. Bodies are pre-rendered by the caller.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// The delivery trait. Implement this to swap the email backend without
/// touching the send pipeline. Carried in `AppState` as `Arc<dyn Mailer>`.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

/// Resend-backed mailer. One HTTP call per send, no retries.
pub struct ResendMailer {
    client: Client,
    api_key: String,
    from: String,
}

impl ResendMailer {
    pub fn new(api_key: String, from: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            from,
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let request_body = ResendRequest {
            from: &self.from,
            to: [email.to.as_str()],
            subject: &email.subject,
            html: &email.html_body,
            text: &email.text_body,
        };

        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Email dispatched to {}", email.to);
        Ok(())
    }
}
