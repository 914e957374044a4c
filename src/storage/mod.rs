//! Persistence seam for accepted submissions.
//!
//! # Design Decisions
//! - Backends sit behind an object-safe async trait so the handler owns no
//!   backend detail and tests can inject failures
//! - Backend errors are logged server-side; callers only ever see a
//!   generic message

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::submission::SubmissionRecord;

pub use memory::MemoryStore;

/// Errors from a persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached or refused the write.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected the record itself.
    #[error("storage backend rejected record: {0}")]
    Rejected(String),
}

/// Capability to persist one accepted submission.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist the record, returning the identifier it was stored under.
    async fn save(&self, record: SubmissionRecord) -> Result<Uuid, StoreError>;
}
