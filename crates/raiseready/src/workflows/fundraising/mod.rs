//! Founder onboarding state, the investability scoring engine, and the
//! change-trigger coordinator that reacts to verification and data-room
//! mutations.
//!
//! Persistence, notification delivery, and audit logging sit behind the traits
//! in [`repository`] so the scoring and trigger logic can be exercised against
//! in-memory fakes. The service facade in [`service`] is the only place the
//! pieces compose.

pub mod domain;
pub mod notify;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod trigger;

#[cfg(test)]
mod tests;

pub use domain::{
    Company, CompanyId, Document, DocumentCategory, Notification, NotificationType, Sector, UserId,
};
pub use notify::NotificationDraft;
pub use repository::{
    AuditError, AuditEvent, AuditSink, CompanyStore, DocumentStore, NotificationSink, NotifyError,
    StoreError,
};
pub use router::fundraising_router;
pub use scoring::{InvestabilityScore, ScoreBreakdown};
pub use service::{
    FundraisingService, FundraisingServiceError, NewCompany, NewDocument,
};
pub use trigger::{ChangeHook, ChangeTrigger, CompanyChange};
