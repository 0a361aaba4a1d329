// Rule Store - persistence boundary for automation rules
//
// The engine re-fetches through this trait on every event; ordering of the
// returned rules is caller-significant and must be stable.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::engine::AutomationRule;
use crate::error::{AutomationError, AutomationResult};

#[async_trait]
pub trait RuleStore: Send + Sync {
    /// Active rules for one tenant, in evaluation order. Must never return a
    /// rule belonging to a different tenant or an inactive rule.
    async fn list_active_rules(&self, tenant_id: Uuid) -> AutomationResult<Vec<AutomationRule>>;

    /// Instrumentation hook, bumped once per rule match. Implementations must
    /// make the increment concurrency-safe; callers ignore the value.
    async fn increment_run_count(&self, rule_id: Uuid) -> AutomationResult<()>;
}

/// Insertion-ordered in-memory store for tests and embedded use.
#[derive(Default)]
pub struct InMemoryRuleStore {
    rules: RwLock<Vec<AutomationRule>>,
}

impl InMemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, rule: AutomationRule) {
        self.rules.write().await.push(rule);
    }

    pub async fn set_active(&self, rule_id: Uuid, is_active: bool) -> AutomationResult<()> {
        let mut rules = self.rules.write().await;
        match rules.iter_mut().find(|r| r.id == rule_id) {
            Some(rule) => {
                rule.is_active = is_active;
                Ok(())
            }
            None => Err(AutomationError::Store(format!(
                "no rule with id {}",
                rule_id
            ))),
        }
    }

    pub async fn get(&self, rule_id: Uuid) -> Option<AutomationRule> {
        self.rules.read().await.iter().find(|r| r.id == rule_id).cloned()
    }
}

#[async_trait]
impl RuleStore for InMemoryRuleStore {
    async fn list_active_rules(&self, tenant_id: Uuid) -> AutomationResult<Vec<AutomationRule>> {
        let rules = self.rules.read().await;
        Ok(rules
            .iter()
            .filter(|r| r.tenant_id == tenant_id && r.is_active)
            .cloned()
            .collect())
    }

    async fn increment_run_count(&self, rule_id: Uuid) -> AutomationResult<()> {
        let mut rules = self.rules.write().await;
        match rules.iter_mut().find(|r| r.id == rule_id) {
            Some(rule) => {
                rule.run_count += 1;
                Ok(())
            }
            None => Err(AutomationError::Store(format!(
                "no rule with id {}",
                rule_id
            ))),
        }
    }
}
