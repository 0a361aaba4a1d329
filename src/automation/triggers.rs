// Automation Triggers - CRM event types that can fire rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Kinds of CRM events a rule can listen for.
///
/// Decodes from its snake_case wire string; strings that predate an enum
/// value land in `Unknown` instead of failing the rule load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TriggerType {
    LeadCreated,
    ContactCreated,
    DealCreated,
    DealStageChanged,
    SmsReceived,
    EmailReceived,
    CallCompleted,
    TaskCompleted,
    Unknown(String),
}

impl TriggerType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::LeadCreated => "lead_created",
            Self::ContactCreated => "contact_created",
            Self::DealCreated => "deal_created",
            Self::DealStageChanged => "deal_stage_changed",
            Self::SmsReceived => "sms_received",
            Self::EmailReceived => "email_received",
            Self::CallCompleted => "call_completed",
            Self::TaskCompleted => "task_completed",
            Self::Unknown(other) => other,
        }
    }
}

impl From<String> for TriggerType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "lead_created" => Self::LeadCreated,
            "contact_created" => Self::ContactCreated,
            "deal_created" => Self::DealCreated,
            "deal_stage_changed" => Self::DealStageChanged,
            "sms_received" => Self::SmsReceived,
            "email_received" => Self::EmailReceived,
            "call_completed" => Self::CallCompleted,
            "task_completed" => Self::TaskCompleted,
            _ => Self::Unknown(value),
        }
    }
}

impl From<TriggerType> for String {
    fn from(value: TriggerType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload for trigger events. Fields are whatever the triggering context had
/// available; consumers must tolerate absence.
pub type EventPayload = serde_json::Value;

/// An ephemeral description of something that just happened in the CRM.
/// Constructed per invocation, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub event_id: Uuid,
    pub tenant_id: Uuid,
    pub trigger_type: TriggerType,
    pub payload: EventPayload,
    pub occurred_at: DateTime<Utc>,
}

impl TriggerEvent {
    /// Create a new trigger event
    pub fn new(tenant_id: Uuid, trigger_type: TriggerType, payload: EventPayload) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            tenant_id,
            trigger_type,
            payload,
            occurred_at: Utc::now(),
        }
    }

    /// Create an inbound SMS event
    pub fn sms_received(
        tenant_id: Uuid,
        from_number: &str,
        sms_body: &str,
        contact_id: Option<Uuid>,
    ) -> Self {
        Self::new(
            tenant_id,
            TriggerType::SmsReceived,
            serde_json::json!({
                "from_number": from_number,
                "sms_body": sms_body,
                "contact_id": contact_id
            }),
        )
    }

    /// Create a deal stage change event
    pub fn deal_stage_changed(
        tenant_id: Uuid,
        deal_id: Uuid,
        old_stage: &str,
        new_stage: &str,
        contact_id: Option<Uuid>,
    ) -> Self {
        Self::new(
            tenant_id,
            TriggerType::DealStageChanged,
            serde_json::json!({
                "deal_id": deal_id,
                "old_stage": old_stage,
                "new_stage": new_stage,
                "contact_id": contact_id
            }),
        )
    }

    /// Create a lead created event
    pub fn lead_created(tenant_id: Uuid, lead_id: Uuid, contact_id: Option<Uuid>) -> Self {
        Self::new(
            tenant_id,
            TriggerType::LeadCreated,
            serde_json::json!({
                "lead_id": lead_id,
                "contact_id": contact_id
            }),
        )
    }

    /// Create an inbound email event
    pub fn email_received(
        tenant_id: Uuid,
        from_address: &str,
        subject: &str,
        contact_id: Option<Uuid>,
    ) -> Self {
        Self::new(
            tenant_id,
            TriggerType::EmailReceived,
            serde_json::json!({
                "from_address": from_address,
                "subject": subject,
                "contact_id": contact_id
            }),
        )
    }

    /// Create a call completed event
    pub fn call_completed(
        tenant_id: Uuid,
        from_number: &str,
        duration_seconds: i64,
        contact_id: Option<Uuid>,
    ) -> Self {
        Self::new(
            tenant_id,
            TriggerType::CallCompleted,
            serde_json::json!({
                "from_number": from_number,
                "duration_seconds": duration_seconds,
                "contact_id": contact_id
            }),
        )
    }

    /// String payload field, if present.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(|v| v.as_str())
    }

    /// The contact this event relates to, if the triggering context knew it.
    pub fn contact_id(&self) -> Option<Uuid> {
        self.str_field("contact_id").and_then(|s| s.parse().ok())
    }
}
