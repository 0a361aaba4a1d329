// Contact Directory - email lookup for `to: "contact"` email actions

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AutomationResult;

/// Resolves a contact's email address. The executor treats an absent
/// collaborator (not wired at construction) differently from a lookup miss:
/// the former is an unimplemented-capability failure, the latter means the
/// contact simply has no usable address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    async fn contact_email(&self, contact_id: Uuid) -> AutomationResult<Option<String>>;
}

/// In-memory directory for tests and embedded use.
#[derive(Default)]
pub struct InMemoryContactDirectory {
    emails: RwLock<HashMap<Uuid, String>>,
}

impl InMemoryContactDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, contact_id: Uuid, email: impl Into<String>) {
        self.emails.write().await.insert(contact_id, email.into());
    }
}

#[async_trait]
impl ContactDirectory for InMemoryContactDirectory {
    async fn contact_email(&self, contact_id: Uuid) -> AutomationResult<Option<String>> {
        Ok(self.emails.read().await.get(&contact_id).cloned())
    }
}
