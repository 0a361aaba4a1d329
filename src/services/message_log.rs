// Message Log - audit trail for outbound automation messages
//
// Fire-and-forget from the engine's perspective: a failed log write is
// reported to the caller but never flips a successful send into a failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::automation::triggers::TriggerType;
use crate::error::AutomationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
    Inbound,
    Outbound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageChannel {
    Sms,
    Email,
    Call,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Queued,
    Sent,
    Failed,
}

/// One row of the conversation history for a contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessageRecord {
    pub contact_id: Uuid,
    pub direction: MessageDirection,
    pub channel: MessageChannel,
    pub to: String,
    pub body: String,
    pub status: MessageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_message_id: Option<String>,
    pub metadata: serde_json::Value,
}

impl OutboundMessageRecord {
    /// Record for a message an automation rule sent on the contact's behalf.
    pub fn automation(
        contact_id: Uuid,
        channel: MessageChannel,
        to: &str,
        body: &str,
        provider_message_id: Option<String>,
        event_type: &TriggerType,
    ) -> Self {
        Self {
            contact_id,
            direction: MessageDirection::Outbound,
            channel,
            to: to.to_string(),
            body: body.to_string(),
            status: MessageStatus::Sent,
            provider_message_id,
            metadata: serde_json::json!({
                "automation_triggered": true,
                "event_type": event_type.as_str()
            }),
        }
    }
}

#[async_trait]
pub trait MessageLog: Send + Sync {
    async fn record_message(&self, record: OutboundMessageRecord) -> AutomationResult<()>;
}

/// In-memory log for tests and embedded use.
#[derive(Default)]
pub struct InMemoryMessageLog {
    records: RwLock<Vec<OutboundMessageRecord>>,
}

impl InMemoryMessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<OutboundMessageRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl MessageLog for InMemoryMessageLog {
    async fn record_message(&self, record: OutboundMessageRecord) -> AutomationResult<()> {
        self.records.write().await.push(record);
        Ok(())
    }
}
