// Action Queue - holds actions scheduled for later execution

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::automation::actions::AutomationAction;
use crate::automation::engine::AutomationRule;
use crate::automation::triggers::TriggerEvent;
use crate::error::AutomationResult;

/// An action waiting for its `run_at` time. Carries the full triggering
/// event so recipient resolution works identically to the immediate path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedAction {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub rule_id: Uuid,
    pub action: AutomationAction,
    pub event: TriggerEvent,
    pub run_at: DateTime<Utc>,
}

impl QueuedAction {
    /// Queue entry for a matched rule, due `delay_minutes` from `now`.
    pub fn from_rule(rule: &AutomationRule, event: &TriggerEvent, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id: rule.tenant_id,
            rule_id: rule.id,
            action: rule.action.clone(),
            event: event.clone(),
            run_at: now + Duration::minutes(rule.action.delay_minutes as i64),
        }
    }
}

#[async_trait]
pub trait ActionQueue: Send + Sync {
    async fn enqueue(&self, item: QueuedAction) -> AutomationResult<()>;

    /// Remove and return every item whose `run_at` is at or before `now`,
    /// oldest due first.
    async fn claim_due(&self, now: DateTime<Utc>) -> AutomationResult<Vec<QueuedAction>>;
}

/// In-memory queue for tests and embedded use.
#[derive(Default)]
pub struct InMemoryActionQueue {
    pending: RwLock<Vec<QueuedAction>>,
}

impl InMemoryActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn pending_count(&self) -> usize {
        self.pending.read().await.len()
    }
}

#[async_trait]
impl ActionQueue for InMemoryActionQueue {
    async fn enqueue(&self, item: QueuedAction) -> AutomationResult<()> {
        self.pending.write().await.push(item);
        Ok(())
    }

    async fn claim_due(&self, now: DateTime<Utc>) -> AutomationResult<Vec<QueuedAction>> {
        let mut pending = self.pending.write().await;
        let mut due: Vec<QueuedAction> = Vec::new();
        pending.retain(|item| {
            if item.run_at <= now {
                due.push(item.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|item| item.run_at);
        Ok(due)
    }
}
