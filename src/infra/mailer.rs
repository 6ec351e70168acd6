//! Outbound email.
//!
//! Delivery goes through the [`Mailer`] trait. The bundled [`LogMailer`]
//! writes each message to the log instead of talking to an SMTP relay,
//! which is what development and test environments want.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;

#[cfg(test)]
use mockall::automock;

/// A rendered email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Recipient email address
    pub to: String,
    /// Sender address
    pub from: String,
    /// Email subject line
    pub subject: String,
    /// Plain text body
    pub body: String,
}

impl EmailMessage {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            from: from.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Mail transport
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message, returning once the transport accepted it
    async fn deliver(&self, message: EmailMessage) -> AppResult<()>;
}

/// Logs messages instead of sending them
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn deliver(&self, message: EmailMessage) -> AppResult<()> {
        tracing::info!(
            to = %message.to,
            from = %message.from,
            subject = %message.subject,
            "Delivering email"
        );
        tracing::debug!(
            "=== EMAIL (not sent) ===\n\
             From: {}\n\
             To: {}\n\
             Subject: {}\n\
             Body:\n{}\n\
             ========================",
            message.from,
            message.to,
            message.subject,
            message.body
        );
        Ok(())
    }
}
