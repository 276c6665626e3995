//! Outbound notification delivery
//!
//! Budget alerts and manual notices can be forwarded to an external
//! messaging service. The rest of the crate only sees the
//! [`NotificationSink`] trait; [`TelegramSink`] is the one real
//! implementation and talks to the Telegram Bot API over blocking HTTP.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::config::NotificationSettings;

/// Environment variable holding the bot token
pub const TOKEN_ENV: &str = "TELEGRAM_TOKEN";

/// Categorized delivery failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The service does not know the destination
    #[error("destination {0} not found")]
    DestinationNotFound(i64),

    /// No token or destination configured
    #[error("notification delivery is not configured: {0}")]
    NotConfigured(String),

    /// Transport failure, timeout or unexpected response
    #[error("delivery failed: {0}")]
    Failed(String),
}

/// Something that can deliver a text message to a numeric destination
pub trait NotificationSink {
    fn notify(&self, destination_id: i64, content: &str) -> Result<(), DeliveryError>;
}

/// Telegram Bot API sink
#[derive(Debug, Clone)]
pub struct TelegramSink {
    http: Client,
    api_base_url: String,
    token: String,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

impl TelegramSink {
    pub fn new(
        token: impl Into<String>,
        api_base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DeliveryError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(DeliveryError::NotConfigured(format!("{} is empty", TOKEN_ENV)));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeliveryError::Failed(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Build a sink from settings and the `TELEGRAM_TOKEN` environment variable
    pub fn from_settings(settings: &NotificationSettings) -> Result<Self, DeliveryError> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| DeliveryError::NotConfigured(format!("{} is not set", TOKEN_ENV)))?;

        Self::new(
            token,
            settings.api_base_url.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base_url, self.token)
    }
}

impl NotificationSink for TelegramSink {
    fn notify(&self, destination_id: i64, content: &str) -> Result<(), DeliveryError> {
        if destination_id <= 0 {
            return Err(DeliveryError::DestinationNotFound(destination_id));
        }

        let response = self
            .http
            .post(self.endpoint())
            .json(&SendMessage {
                chat_id: destination_id,
                text: content,
            })
            .send()
            .map_err(|e| {
                // never leak the token, which is part of the URL
                DeliveryError::Failed(e.without_url().to_string())
            })?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::BAD_REQUEST | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                Err(DeliveryError::DestinationNotFound(destination_id))
            }
            status => Err(DeliveryError::Failed(format!(
                "unexpected response status {}",
                status
            ))),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use super::{DeliveryError, NotificationSink};

    /// Sink that records every call and can be told to fail
    #[derive(Default)]
    pub struct RecordingSink {
        pub sent: RefCell<Vec<(i64, String)>>,
        pub fail_with: Option<DeliveryError>,
    }

    impl RecordingSink {
        pub fn failing(error: DeliveryError) -> Self {
            Self {
                sent: RefCell::default(),
                fail_with: Some(error),
            }
        }
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, destination_id: i64, content: &str) -> Result<(), DeliveryError> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            self.sent
                .borrow_mut()
                .push((destination_id, content.to_string()));
            Ok(())
        }
    }
}
