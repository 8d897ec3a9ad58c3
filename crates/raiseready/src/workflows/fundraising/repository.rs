use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{Company, CompanyId, Document, Notification, UserId};
use super::notify::NotificationDraft;

/// Storage abstraction for company profiles. Creation enforces the
/// one-company-per-user invariant via `StoreError::Conflict`.
pub trait CompanyStore: Send + Sync {
    fn insert(&self, company: Company) -> Result<Company, StoreError>;
    fn fetch(&self, id: &CompanyId) -> Result<Option<Company>, StoreError>;
    fn update(&self, company: Company) -> Result<(), StoreError>;
}

/// Document metadata store. Scoring only ever consumes the count; streaming,
/// validation of file contents, and disk paths live with the file-handling
/// collaborator, not here.
pub trait DocumentStore: Send + Sync {
    fn count_for_company(&self, id: &CompanyId) -> Result<u32, StoreError>;
    fn insert(&self, document: Document) -> Result<Document, StoreError>;
    fn remove(&self, company_id: &CompanyId, document_id: &str) -> Result<(), StoreError>;
}

/// Per-user message delivery. Failures here are best-effort for the callers
/// that emit mutation notifications.
pub trait NotificationSink: Send + Sync {
    fn publish(&self, draft: NotificationDraft) -> Result<Notification, NotifyError>;
    /// Delete read notifications older than the cutoff, returning how many
    /// were removed.
    fn prune_read(&self, older_than: DateTime<Utc>) -> Result<u32, NotifyError>;
}

/// Append-only audit log consumed by compliance tooling.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent) -> Result<(), AuditError>;
}

/// One audit trail entry. Metadata is free-form JSON so each mutation path
/// can attach what it knows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub user: UserId,
    pub action: String,
    pub resource: String,
    pub metadata: Value,
    pub at: DateTime<Utc>,
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Audit sink error.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}
