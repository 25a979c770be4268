//! EmailJS REST client
//!
//! The send call carries the credentials, a small set of template
//! parameters and the attachments as data URLs.

use crate::config::EmailJsConfig;
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Attachment entry of the send call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub name: String,
    /// `data:<mime>;base64,<payload>`
    pub data: String,
}

/// Body of `POST /api/v1.0/email/send`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendRequest {
    pub service_id: String,
    pub template_id: String,
    #[serde(rename = "user_id")]
    pub public_key: String,
    pub template_params: BTreeMap<String, String>,
    pub attachments: Vec<Attachment>,
}

impl SendRequest {
    /// Request addressed to the configured recipient
    pub fn new(config: &EmailJsConfig, attachments: Vec<Attachment>) -> Self {
        let mut template_params = BTreeMap::new();
        template_params.insert("to_email".to_string(), config.recipient.clone());

        Self {
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            public_key: config.public_key.clone(),
            template_params,
            attachments,
        }
    }
}

/// Rejection or transport error reported by the provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{text}")]
pub struct SendFailure {
    /// HTTP status, `None` when no response arrived
    pub status: Option<u16>,
    /// Provider message text
    pub text: String,
}

pub trait EmailSender {
    fn send(&self, request: &SendRequest) -> impl Future<Output = Result<(), SendFailure>> + Send;
}

pub struct EmailJsClient {
    client: reqwest::Client,
    api_url: String,
}

impl EmailJsClient {
    pub fn new(config: &EmailJsConfig) -> Result<Self, SendFailure> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SendFailure {
                status: None,
                text: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }
}

impl EmailSender for EmailJsClient {
    async fn send(&self, request: &SendRequest) -> Result<(), SendFailure> {
        tracing::debug!(
            url = %self.api_url,
            service_id = %request.service_id,
            template_id = %request.template_id,
            attachments = request.attachments.len(),
            "sending e-mail"
        );

        let response = self
            .client
            .post(&self.api_url)
            .json(request)
            .send()
            .await
            .map_err(|e| SendFailure {
                status: e.status().map(|s| s.as_u16()),
                text: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        Err(SendFailure {
            status: Some(status.as_u16()),
            text: if text.trim().is_empty() {
                status.to_string()
            } else {
                text
            },
        })
    }
}
