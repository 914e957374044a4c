//! In-memory submission storage.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::storage::{StoreError, SubmissionStore};
use crate::submission::SubmissionRecord;

/// A stored submission with its assigned identity.
#[derive(Debug, Clone)]
pub struct StoredSubmission {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    pub record: SubmissionRecord,
}

/// Process-local store backing the service by default.
///
/// Submissions live only as long as the process; operators wanting
/// durability plug in a different [`SubmissionStore`] at construction.
#[derive(Default)]
pub struct MemoryStore {
    submissions: Mutex<Vec<StoredSubmission>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.submissions.lock().expect("submission store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch a stored submission by id.
    pub fn get(&self, id: Uuid) -> Option<StoredSubmission> {
        self.submissions
            .lock()
            .expect("submission store mutex poisoned")
            .iter()
            .find(|stored| stored.id == id)
            .cloned()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn save(&self, record: SubmissionRecord) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let stored = StoredSubmission {
            id,
            received_at: Utc::now(),
            record,
        };

        self.submissions
            .lock()
            .expect("submission store mutex poisoned")
            .push(stored);

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::{SanitizedSubmission, SubmissionRecord};

    fn record() -> SubmissionRecord {
        SubmissionRecord::new(
            SanitizedSubmission {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                subject: None,
                message: "Hello there, this works.".into(),
            },
            "1.2.3.4".into(),
            "test-agent".into(),
        )
    }

    #[tokio::test]
    async fn test_save_assigns_distinct_ids() {
        let store = MemoryStore::new();

        let a = store.save(record()).await.unwrap();
        let b = store.save(record()).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);

        let stored = store.get(a).unwrap();
        assert_eq!(stored.record.email, "ada@example.com");
        assert_eq!(stored.record.client_id, "1.2.3.4");
    }
}
