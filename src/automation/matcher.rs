// Trigger Matcher - decides whether a rule fires for an event
//
// Pure and total: same inputs always produce the same bool, nothing here can
// fail or touch the outside world. The orchestrator has already established
// that the rule is active and its trigger type equals the event type.

use super::engine::AutomationRule;
use super::triggers::{TriggerEvent, TriggerType};

/// Does `rule` fire for `event`?
///
/// An empty or absent `trigger_value` matches every event of the rule's
/// trigger type. A non-empty predicate is interpreted per trigger type;
/// trigger types with no defined predicate never match a configured value
/// (fail closed, so unimplemented predicates cannot over-fire).
pub fn matches(rule: &AutomationRule, event: &TriggerEvent) -> bool {
    let value = match rule.trigger_value.as_deref() {
        None | Some("") => return true,
        Some(value) => value,
    };

    match rule.trigger_type {
        TriggerType::SmsReceived => event
            .str_field("sms_body")
            .map(|body| body.to_lowercase().contains(&value.to_lowercase()))
            .unwrap_or(false),
        TriggerType::DealStageChanged => event
            .str_field("new_stage")
            .map(|stage| stage == value)
            .unwrap_or(false),
        _ => false,
    }
}
