// Action Executor - carries out the action configured on a matched rule

use std::sync::Arc;
use tracing::{info, warn};

use super::actions::{
    ActionConfig, ActionResult, ActionType, AutomationAction, EmailActionConfig, SmsActionConfig,
};
use super::triggers::TriggerEvent;
use crate::error::AutomationResult;
use crate::services::contacts::ContactDirectory;
use crate::services::delivery::{EmailMessage, EmailSender, SmsMessage, SmsSender};
use crate::services::message_log::{MessageChannel, MessageLog, OutboundMessageRecord};

/// Executes rule actions against injected delivery adapters.
///
/// Every internal error is converted to a failed `ActionResult` at the
/// `execute` boundary; nothing propagates to the orchestrator. A message-log
/// write that fails after a successful send does not flip the result: the
/// send is authoritative and the missing audit row is only logged.
pub struct ActionExecutor {
    sms: Arc<dyn SmsSender>,
    email: Arc<dyn EmailSender>,
    message_log: Arc<dyn MessageLog>,
    contacts: Option<Arc<dyn ContactDirectory>>,
    default_email_subject: String,
}

impl ActionExecutor {
    pub fn new(
        sms: Arc<dyn SmsSender>,
        email: Arc<dyn EmailSender>,
        message_log: Arc<dyn MessageLog>,
    ) -> Self {
        Self {
            sms,
            email,
            message_log,
            contacts: None,
            default_email_subject: "Message from your LeadFlow team".to_string(),
        }
    }

    /// Wire the contact-email lookup. Without it, `send_email` with
    /// `to: "contact"` fails explicitly instead of silently skipping.
    pub fn with_contact_directory(mut self, contacts: Arc<dyn ContactDirectory>) -> Self {
        self.contacts = Some(contacts);
        self
    }

    pub fn with_default_email_subject(mut self, subject: impl Into<String>) -> Self {
        self.default_email_subject = subject.into();
        self
    }

    /// Execute a single action. `delay_minutes` is ignored here; immediate
    /// dispatch is the only path this executor knows. Deferred execution
    /// goes through the queue in `jobs`, which calls back into this method.
    pub async fn execute(&self, action: &AutomationAction, event: &TriggerEvent) -> ActionResult {
        info!("Executing action: {}", action.action_type);

        let result = match &action.action_type {
            ActionType::SendSms => match &action.config {
                ActionConfig::SendSms(config) => self.execute_send_sms(config, event).await,
                _ => Ok(ActionResult::failure(
                    "send_sms",
                    "Invalid send_sms configuration",
                )),
            },
            ActionType::SendEmail => match &action.config {
                ActionConfig::SendEmail(config) => self.execute_send_email(config, event).await,
                _ => Ok(ActionResult::failure(
                    "send_email",
                    "Invalid send_email configuration",
                )),
            },
            ActionType::CreateTask => Ok(ActionResult::failure(
                "create_task",
                "Task creation not yet implemented",
            )),
            ActionType::UpdateDeal => Ok(ActionResult::failure(
                "update_deal",
                "Deal update not yet implemented",
            )),
            ActionType::Unknown(name) => Ok(ActionResult::failure(
                name,
                format!("Unknown action type: {}", name),
            )),
        };

        match result {
            Ok(result) => result,
            Err(e) => ActionResult::failure(action.action_type.as_str(), e.to_string()),
        }
    }

    async fn execute_send_sms(
        &self,
        config: &SmsActionConfig,
        event: &TriggerEvent,
    ) -> AutomationResult<ActionResult> {
        let to = match resolve_sms_recipient(config.to.as_deref(), event) {
            Some(to) => to,
            None => {
                return Ok(ActionResult::failure(
                    "send_sms",
                    "No recipient phone number available",
                ))
            }
        };

        let receipt = self
            .sms
            .send_sms(&SmsMessage {
                to: to.clone(),
                body: config.template.clone(),
            })
            .await?;

        if receipt.success {
            if let Some(contact_id) = event.contact_id() {
                let record = OutboundMessageRecord::automation(
                    contact_id,
                    MessageChannel::Sms,
                    &to,
                    &config.template,
                    receipt.message_id,
                    &event.trigger_type,
                );
                if let Err(e) = self.message_log.record_message(record).await {
                    warn!("SMS sent to {} but message log write failed: {}", to, e);
                }
            }
            Ok(ActionResult::success(
                "send_sms",
                format!("SMS sent to {}", to),
            ))
        } else {
            let reason = receipt
                .error
                .clone()
                .unwrap_or_else(|| "delivery rejected".to_string());
            Ok(ActionResult {
                success: false,
                action: "send_sms".to_string(),
                message: Some(format!("Failed: {}", reason)),
                error: receipt.error,
            })
        }
    }

    async fn execute_send_email(
        &self,
        config: &EmailActionConfig,
        event: &TriggerEvent,
    ) -> AutomationResult<ActionResult> {
        let to = match config.to.as_deref() {
            Some("contact") => {
                let contacts = match &self.contacts {
                    Some(contacts) => contacts,
                    None => {
                        return Ok(ActionResult::failure(
                            "send_email",
                            "Contact email lookup not yet implemented",
                        ))
                    }
                };
                let contact_id = match event.contact_id() {
                    Some(id) => id,
                    None => {
                        return Ok(ActionResult::failure(
                            "send_email",
                            "No recipient email available",
                        ))
                    }
                };
                match contacts.contact_email(contact_id).await? {
                    Some(email) => email,
                    None => {
                        return Ok(ActionResult::failure(
                            "send_email",
                            "No recipient email available",
                        ))
                    }
                }
            }
            Some(address) if address.contains('@') => address.to_string(),
            _ => {
                return Ok(ActionResult::failure(
                    "send_email",
                    "No recipient email available",
                ))
            }
        };

        let subject = config
            .subject
            .clone()
            .unwrap_or_else(|| self.default_email_subject.clone());
        let text_body = strip_html_tags(&config.template);

        let receipt = self
            .email
            .send_email(&EmailMessage {
                to: to.clone(),
                subject,
                html_body: config.template.clone(),
                text_body,
            })
            .await?;

        if receipt.success {
            if let Some(contact_id) = event.contact_id() {
                let record = OutboundMessageRecord::automation(
                    contact_id,
                    MessageChannel::Email,
                    &to,
                    &config.template,
                    receipt.message_id,
                    &event.trigger_type,
                );
                if let Err(e) = self.message_log.record_message(record).await {
                    warn!("Email sent to {} but message log write failed: {}", to, e);
                }
            }
            Ok(ActionResult::success(
                "send_email",
                format!("Email sent to {}", to),
            ))
        } else {
            let reason = receipt
                .error
                .clone()
                .unwrap_or_else(|| "delivery rejected".to_string());
            Ok(ActionResult {
                success: false,
                action: "send_email".to_string(),
                message: Some(format!("Failed: {}", reason)),
                error: receipt.error,
            })
        }
    }
}

/// Resolve the destination number for a `send_sms` action.
///
/// `"contact"` means reply to the number the event came from; a `+`-prefixed
/// value is used literally; anything else is unresolvable.
fn resolve_sms_recipient(to: Option<&str>, event: &TriggerEvent) -> Option<String> {
    match to {
        Some("contact") => event.str_field("from_number").map(str::to_string),
        Some(number) if number.starts_with('+') => Some(number.to_string()),
        _ => None,
    }
}

/// Plain-text rendition of an HTML template, for the text/plain email part.
fn strip_html_tags(html: &str) -> String {
    let tags = regex::Regex::new(r"<[^>]*>").unwrap();
    let stripped = tags.replace_all(html, " ");
    let whitespace = regex::Regex::new(r"\s+").unwrap();
    whitespace.replace_all(stripped.trim(), " ").to_string()
}
