// LeadFlow Automation Engine
//
// Rules-based automation for the LeadFlow CRM platform. Tenant-scoped rules
// pair a trigger (inbound SMS, deal stage change, new lead, ...) with an
// action (send SMS, send email, create task, update deal); this crate matches
// incoming CRM events against those rules and dispatches the configured
// actions with per-rule failure isolation.
//
// The crate is an in-process library: webhook and deal-update handlers
// construct a `TriggerEvent` and call `AutomationEngine::process_automations`.
// Persistence, delivery providers, and contact lookup are collaborator traits
// injected at construction.

pub mod automation;
pub mod config;
pub mod error;
pub mod jobs;
pub mod services;

pub use automation::{
    ActionConfig, ActionExecutor, ActionResult, ActionType, AutomationAction, AutomationEngine,
    AutomationRule, EmailActionConfig, EventPayload, InMemoryRuleStore, RuleStore,
    SmsActionConfig, TriggerEvent, TriggerType,
};
pub use config::{AutomationConfig, SmtpConfig};
pub use error::{AutomationError, AutomationResult};
pub use jobs::{ActionQueue, AutomationScheduler, InMemoryActionQueue, QueuedAction};
pub use services::{
    ContactDirectory, DeliveryReceipt, EmailMessage, EmailSender, InMemoryContactDirectory,
    InMemoryMessageLog, MessageChannel, MessageDirection, MessageLog, MessageStatus,
    OutboundMessageRecord, SmsMessage, SmsSender, SmtpMailer,
};

#[cfg(test)]
mod tests;
