// Automation Engine - orchestrates rule matching and action dispatch

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::actions::{ActionResult, AutomationAction};
use super::executor::ActionExecutor;
use super::matcher;
use super::store::RuleStore;
use super::triggers::{TriggerEvent, TriggerType};

/// A persisted trigger+action pairing, scoped to a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationRule {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub trigger_type: TriggerType,
    /// Optional matching predicate, interpreted per trigger type by the
    /// matcher. Empty/absent means "fire on every occurrence".
    #[serde(default)]
    pub trigger_value: Option<String>,
    pub action: AutomationAction,
    pub is_active: bool,
    /// Incremented once per rule match. Observability only; nothing in the
    /// engine reads it back.
    #[serde(default)]
    pub run_count: u64,
}

impl AutomationRule {
    pub fn new(
        tenant_id: Uuid,
        name: &str,
        trigger_type: TriggerType,
        action: AutomationAction,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            name: name.to_string(),
            description: None,
            trigger_type,
            trigger_value: None,
            action,
            is_active: true,
            run_count: 0,
        }
    }

    pub fn with_trigger_value(mut self, value: &str) -> Self {
        self.trigger_value = Some(value.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// The orchestrator: one call per CRM event, one `ActionResult` per matched
/// rule, in the order the store returned the rules.
///
/// Stateless across invocations — rules are re-fetched on every call, so a
/// deactivation takes effect on the very next event. Concurrent calls are
/// independent; any shared-state concerns (like the run counter) belong to
/// the collaborators.
pub struct AutomationEngine {
    rules: Arc<dyn RuleStore>,
    executor: ActionExecutor,
}

impl AutomationEngine {
    pub fn new(rules: Arc<dyn RuleStore>, executor: ActionExecutor) -> Self {
        Self { rules, executor }
    }

    /// Evaluate every active rule of the event's tenant against the event and
    /// execute the actions of those that match, sequentially.
    ///
    /// A rule-store failure is fatal to the whole call and yields a single
    /// synthetic failure result. A failure inside any one rule's action is
    /// local to that rule: it becomes that rule's failed `ActionResult` and
    /// evaluation of the remaining rules continues.
    pub async fn process_automations(&self, event: &TriggerEvent) -> Vec<ActionResult> {
        info!(
            "Processing {} event for tenant {}",
            event.trigger_type, event.tenant_id
        );

        let rules = match self.rules.list_active_rules(event.tenant_id).await {
            Ok(rules) => rules,
            Err(e) => {
                error!("Failed to load automation rules: {}", e);
                return vec![ActionResult::failure("process_automations", e.to_string())];
            }
        };

        let mut results = Vec::new();

        for rule in &rules {
            if !rule.is_active {
                continue;
            }
            if rule.trigger_type != event.trigger_type {
                continue;
            }
            if !matcher::matches(rule, event) {
                continue;
            }

            info!("Rule '{}' matched", rule.name);

            // Observability only; a miss here never affects dispatch.
            if let Err(e) = self.rules.increment_run_count(rule.id).await {
                warn!("Failed to bump run count for rule '{}': {}", rule.name, e);
            }

            let result = self.executor.execute(&rule.action, event).await;
            if !result.success {
                warn!(
                    "Rule '{}' action {} failed: {}",
                    rule.name,
                    result.action,
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            results.push(result);
        }

        results
    }

    // ===== Convenience wrappers per trigger type =====

    /// Run automations for an inbound SMS.
    pub async fn trigger_sms_automation(
        &self,
        tenant_id: Uuid,
        from_number: &str,
        sms_body: &str,
        contact_id: Option<Uuid>,
    ) -> Vec<ActionResult> {
        let event = TriggerEvent::sms_received(tenant_id, from_number, sms_body, contact_id);
        self.process_automations(&event).await
    }

    /// Run automations for a deal moving to a new stage.
    pub async fn trigger_deal_stage_automation(
        &self,
        tenant_id: Uuid,
        deal_id: Uuid,
        old_stage: &str,
        new_stage: &str,
        contact_id: Option<Uuid>,
    ) -> Vec<ActionResult> {
        let event =
            TriggerEvent::deal_stage_changed(tenant_id, deal_id, old_stage, new_stage, contact_id);
        self.process_automations(&event).await
    }

    /// Run automations for a newly created lead.
    pub async fn trigger_lead_created_automation(
        &self,
        tenant_id: Uuid,
        lead_id: Uuid,
        contact_id: Option<Uuid>,
    ) -> Vec<ActionResult> {
        let event = TriggerEvent::lead_created(tenant_id, lead_id, contact_id);
        self.process_automations(&event).await
    }
}
