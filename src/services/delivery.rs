// Delivery Adapters - outbound SMS/email provider boundary
//
// The engine never talks to a provider directly; it goes through these traits
// so tests inject fakes and deployments pick concrete clients. A provider
// rejection comes back as a failed receipt; a transport-level error may also
// surface as Err, and the executor treats both the same way.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AutomationResult;

/// An outbound SMS ready to hand to a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsMessage {
    pub to: String,
    pub body: String,
}

/// An outbound email ready to hand to a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Provider response for one delivery attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeliveryReceipt {
    pub fn accepted(message_id: impl Into<String>) -> Self {
        Self {
            success: true,
            message_id: Some(message_id.into()),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message_id: None,
            error: Some(error.into()),
        }
    }
}

#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send_sms(&self, message: &SmsMessage) -> AutomationResult<DeliveryReceipt>;
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, message: &EmailMessage) -> AutomationResult<DeliveryReceipt>;
}
