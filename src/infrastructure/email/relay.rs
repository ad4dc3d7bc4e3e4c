use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;
use zeroize::Zeroizing;

use crate::{errors::DeliveryError, settings::AppConfig};

/// One notification e-mail, ready to hand to a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub reply_to: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DeliveryError>;
}

#[derive(Serialize)]
struct SendEmailPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    reply_to: &'a str,
}

/// Transactional e-mail over HTTP (`POST {api_url}/emails`, bearer auth).
#[derive(Clone)]
pub struct HttpEmailRelay {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
    from: String,
}

impl HttpEmailRelay {
    pub fn new(
        api_url: &Url,
        api_key: &str,
        from: &str,
        timeout: Duration,
    ) -> Result<Self, DeliveryError> {
        let client = Client::builder().timeout(timeout).build()?;
        let mut base = api_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join("emails")
            .map_err(|e| DeliveryError::Transport(format!("Invalid email API URL: {}", e)))?;

        Ok(HttpEmailRelay {
            client,
            endpoint,
            api_key: Zeroizing::new(api_key.to_string()),
            from: from.to_string(),
        })
    }

    /// Builds a relay when an API key is configured, `None` otherwise.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, DeliveryError> {
        let Some(api_key) = config.email_api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return Ok(None);
        };

        HttpEmailRelay::new(
            &config.email_api_url,
            api_key,
            &config.email_from,
            Duration::from_secs(config.email_timeout_secs),
        )
        .map(Some)
    }
}

#[async_trait]
impl EmailSender for HttpEmailRelay {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DeliveryError> {
        let payload = SendEmailPayload {
            from: &self.from,
            to: [email.to.as_str()],
            subject: &email.subject,
            html: &email.html_body,
            reply_to: &email.reply_to,
        };

        let response = self.client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_str())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(to = %email.to, "Notification email accepted by provider");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::Rejected { status: status.as_u16(), body })
    }
}
