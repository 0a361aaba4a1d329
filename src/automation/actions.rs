// Automation Actions - the side effects rules can perform

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AutomationError, AutomationResult};

/// Kinds of actions a rule can run when its trigger matches.
///
/// Decodes from its snake_case wire string; strings that predate an enum
/// value land in `Unknown` so old rule rows keep loading. Executing an
/// `Unknown` action yields a documented failure result, never a crash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionType {
    SendSms,
    SendEmail,
    CreateTask,
    UpdateDeal,
    Unknown(String),
}

impl ActionType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SendSms => "send_sms",
            Self::SendEmail => "send_email",
            Self::CreateTask => "create_task",
            Self::UpdateDeal => "update_deal",
            Self::Unknown(other) => other,
        }
    }
}

impl From<String> for ActionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "send_sms" => Self::SendSms,
            "send_email" => Self::SendEmail,
            "create_task" => Self::CreateTask,
            "update_deal" => Self::UpdateDeal,
            _ => Self::Unknown(value),
        }
    }
}

impl From<ActionType> for String {
    fn from(value: ActionType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a `send_sms` action.
///
/// `to` is either the literal string `"contact"` (reply to the number the
/// triggering event came from) or a `+`-prefixed phone number. Anything else
/// fails recipient resolution at execution time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsActionConfig {
    #[serde(default)]
    pub to: Option<String>,
    pub template: String,
}

/// Configuration for a `send_email` action. `to` is `"contact"` (resolved
/// through the contact directory) or a literal address containing `@`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailActionConfig {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub template: String,
}

/// Typed action configuration, keyed by the action type it belongs to.
///
/// Decoded once at the rule-load boundary: malformed config for a known
/// action type fails the load, not event processing. Unimplemented and
/// unknown action types carry their raw config through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActionConfig {
    SendSms(SmsActionConfig),
    SendEmail(EmailActionConfig),
    CreateTask(serde_json::Value),
    UpdateDeal(serde_json::Value),
    Opaque(serde_json::Value),
}

/// An action configured on a rule.
///
/// `delay_minutes` is inert in the immediate dispatch path; it is read only
/// by the deferred-dispatch queue in `jobs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationAction {
    pub action_type: ActionType,
    #[serde(default)]
    pub delay_minutes: u32,
    pub config: ActionConfig,
}

impl AutomationAction {
    /// Decode a raw config blob for the given action type. Unknown keys are
    /// ignored; missing required keys fail the rule load.
    pub fn decode(
        action_type: ActionType,
        delay_minutes: u32,
        raw_config: serde_json::Value,
    ) -> AutomationResult<Self> {
        let config = match &action_type {
            ActionType::SendSms => ActionConfig::SendSms(
                serde_json::from_value(raw_config)
                    .map_err(|e| AutomationError::InvalidRule(format!("send_sms config: {}", e)))?,
            ),
            ActionType::SendEmail => ActionConfig::SendEmail(
                serde_json::from_value(raw_config).map_err(|e| {
                    AutomationError::InvalidRule(format!("send_email config: {}", e))
                })?,
            ),
            ActionType::CreateTask => ActionConfig::CreateTask(raw_config),
            ActionType::UpdateDeal => ActionConfig::UpdateDeal(raw_config),
            ActionType::Unknown(_) => ActionConfig::Opaque(raw_config),
        };

        Ok(Self {
            action_type,
            delay_minutes,
            config,
        })
    }

    // ===== Builders =====

    pub fn send_sms(to: &str, template: &str) -> Self {
        Self {
            action_type: ActionType::SendSms,
            delay_minutes: 0,
            config: ActionConfig::SendSms(SmsActionConfig {
                to: Some(to.to_string()),
                template: template.to_string(),
            }),
        }
    }

    pub fn send_email(to: &str, subject: Option<&str>, template: &str) -> Self {
        Self {
            action_type: ActionType::SendEmail,
            delay_minutes: 0,
            config: ActionConfig::SendEmail(EmailActionConfig {
                to: Some(to.to_string()),
                subject: subject.map(str::to_string),
                template: template.to_string(),
            }),
        }
    }

    pub fn create_task(config: serde_json::Value) -> Self {
        Self {
            action_type: ActionType::CreateTask,
            delay_minutes: 0,
            config: ActionConfig::CreateTask(config),
        }
    }

    pub fn update_deal(config: serde_json::Value) -> Self {
        Self {
            action_type: ActionType::UpdateDeal,
            delay_minutes: 0,
            config: ActionConfig::UpdateDeal(config),
        }
    }

    pub fn with_delay(mut self, minutes: u32) -> Self {
        self.delay_minutes = minutes;
        self
    }
}

/// Result of attempting one rule's action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    /// The action-type string that ran (or was attempted).
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Present iff `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    pub fn success(action: &str, message: impl Into<String>) -> Self {
        Self {
            success: true,
            action: action.to_string(),
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(action: &str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            action: action.to_string(),
            message: None,
            error: Some(error.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
