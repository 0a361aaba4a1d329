// Automation Engine
//
// Trigger-matching and action-dispatch over tenant-scoped rules. CRM events
// flow in, matching rules fire, and each matched rule's action produces one
// ActionResult — failures stay local to the rule that caused them.

pub mod actions;
pub mod engine;
pub mod executor;
pub mod matcher;
pub mod store;
pub mod triggers;

pub use actions::{
    ActionConfig, ActionResult, ActionType, AutomationAction, EmailActionConfig, SmsActionConfig,
};
pub use engine::{AutomationEngine, AutomationRule};
pub use executor::ActionExecutor;
pub use store::{InMemoryRuleStore, RuleStore};
pub use triggers::{EventPayload, TriggerEvent, TriggerType};
