use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use super::domain::{Company, CompanyId, Document, DocumentCategory, Notification, Sector, UserId};
use super::notify;
use super::repository::{
    AuditError, AuditEvent, AuditSink, CompanyStore, DocumentStore, NotificationSink, NotifyError,
    StoreError,
};
use super::scoring::{self, InvestabilityScore};
use super::trigger::{ChangeTrigger, CompanyChange};

const MAX_DOCUMENT_NAME_LEN: usize = 120;

/// Facade composing the stores, sinks, scoring engine, and change-trigger
/// coordinator. Every handle is injected so the workflow can be exercised
/// against in-memory fakes.
pub struct FundraisingService<C, D, N, A> {
    companies: Arc<C>,
    documents: Arc<D>,
    notifications: Arc<N>,
    audit: Arc<A>,
    trigger: ChangeTrigger,
}

/// Onboarding payload for a new company profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCompany {
    pub owner: UserId,
    pub name: String,
    pub sector: Sector,
    pub target_raise: f64,
    #[serde(default)]
    pub revenue: f64,
}

/// Upload payload for a data-room document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub category: DocumentCategory,
}

static COMPANY_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static DOCUMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_company_id() -> CompanyId {
    let id = COMPANY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CompanyId(format!("co-{id:06}"))
}

fn next_document_id() -> String {
    let id = DOCUMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("doc-{id:06}")
}

fn sanitize_document_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '/' | '\\' => '_',
            other => other,
        })
        .collect();

    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.chars().take(MAX_DOCUMENT_NAME_LEN).collect()
    }
}

impl<C, D, N, A> FundraisingService<C, D, N, A>
where
    C: CompanyStore + 'static,
    D: DocumentStore + 'static,
    N: NotificationSink + 'static,
    A: AuditSink + 'static,
{
    pub fn new(
        companies: Arc<C>,
        documents: Arc<D>,
        notifications: Arc<N>,
        audit: Arc<A>,
    ) -> Self {
        Self::with_trigger(companies, documents, notifications, audit, ChangeTrigger::new())
    }

    /// Construct with a pre-populated trigger so callers can attach hooks
    /// (cache invalidation, analytics) before the service goes live.
    pub fn with_trigger(
        companies: Arc<C>,
        documents: Arc<D>,
        notifications: Arc<N>,
        audit: Arc<A>,
        trigger: ChangeTrigger,
    ) -> Self {
        Self {
            companies,
            documents,
            notifications,
            audit,
            trigger,
        }
    }

    /// Create a company profile. The store enforces at most one company per
    /// user by rejecting a second insert with `StoreError::Conflict`.
    pub fn onboard_company(
        &self,
        payload: NewCompany,
    ) -> Result<Company, FundraisingServiceError> {
        let name = payload.name.trim().to_string();
        if name.is_empty() {
            return Err(FundraisingServiceError::InvalidProfile(
                "company name must not be empty".to_string(),
            ));
        }
        if !payload.target_raise.is_finite() || payload.target_raise <= 0.0 {
            return Err(FundraisingServiceError::InvalidProfile(
                "target raise must be a positive amount".to_string(),
            ));
        }
        if !payload.revenue.is_finite() || payload.revenue < 0.0 {
            return Err(FundraisingServiceError::InvalidProfile(
                "revenue must be zero or positive".to_string(),
            ));
        }

        let company = Company {
            id: next_company_id(),
            owner: payload.owner,
            name,
            sector: payload.sector,
            target_raise: payload.target_raise,
            revenue: payload.revenue,
            kyc_verified: false,
            financials_linked: false,
            created_at: Utc::now(),
        };

        let stored = self.companies.insert(company)?;
        self.record_audit(
            &stored,
            "company.onboarded",
            json!({ "sector": stored.sector.label() }),
        )?;
        Ok(stored)
    }

    /// Current score and breakdown. Pure per call: identical inputs yield
    /// identical results, and nothing is persisted.
    pub fn calculate_score(
        &self,
        id: &CompanyId,
    ) -> Result<InvestabilityScore, FundraisingServiceError> {
        let company = self.fetch_company(id)?;
        let document_count = self.documents.count_for_company(id)?;
        Ok(scoring::calculate(&company, document_count))
    }

    /// Ordered improvement checklist for the company's dashboard.
    pub fn recommendations(
        &self,
        id: &CompanyId,
    ) -> Result<Vec<String>, FundraisingServiceError> {
        let company = self.fetch_company(id)?;
        let document_count = self.documents.count_for_company(id)?;
        Ok(scoring::recommendations(&company, document_count))
    }

    /// Mark KYC as verified. The flag only ever moves false to true; a repeat
    /// call fails with `AlreadyDone` before any side effect runs.
    pub fn verify_kyc(&self, id: &CompanyId) -> Result<Company, FundraisingServiceError> {
        let mut company = self.fetch_company(id)?;
        if company.kyc_verified {
            return Err(FundraisingServiceError::AlreadyDone("kyc verification"));
        }

        company.kyc_verified = true;
        self.companies.update(company.clone())?;
        self.record_audit(&company, "company.kyc_verified", json!({}))?;
        self.notify_best_effort(notify::kyc_verified(company.owner.clone()));
        self.on_company_data_change(id, CompanyChange::KycVerified)?;
        Ok(company)
    }

    /// Link financial accounts. Idempotency mirrors [`Self::verify_kyc`].
    pub fn link_financials(&self, id: &CompanyId) -> Result<Company, FundraisingServiceError> {
        let mut company = self.fetch_company(id)?;
        if company.financials_linked {
            return Err(FundraisingServiceError::AlreadyDone("financial link"));
        }

        company.financials_linked = true;
        self.companies.update(company.clone())?;
        self.record_audit(&company, "company.financials_linked", json!({}))?;
        self.notify_best_effort(notify::financials_linked(company.owner.clone()));
        self.on_company_data_change(id, CompanyChange::FinancialsLinked)?;
        Ok(company)
    }

    /// Unlink financial accounts. No notification is emitted; the score drop
    /// is visible on the next read.
    pub fn unlink_financials(&self, id: &CompanyId) -> Result<Company, FundraisingServiceError> {
        let mut company = self.fetch_company(id)?;
        if !company.financials_linked {
            return Err(FundraisingServiceError::AlreadyDone("financial unlink"));
        }

        company.financials_linked = false;
        self.companies.update(company.clone())?;
        self.record_audit(&company, "company.financials_unlinked", json!({}))?;
        self.on_company_data_change(id, CompanyChange::FinancialsUnlinked)?;
        Ok(company)
    }

    /// Store upload metadata for the data room and announce it to the owner.
    pub fn add_document(
        &self,
        id: &CompanyId,
        payload: NewDocument,
    ) -> Result<Document, FundraisingServiceError> {
        let company = self.fetch_company(id)?;

        if payload.size == 0 {
            return Err(FundraisingServiceError::InvalidDocument(
                "document size must be positive".to_string(),
            ));
        }
        payload.mime_type.parse::<mime::Mime>().map_err(|_| {
            FundraisingServiceError::InvalidDocument(format!(
                "unrecognized mime type '{}'",
                payload.mime_type
            ))
        })?;

        let document = Document {
            id: next_document_id(),
            company_id: company.id.clone(),
            name: sanitize_document_name(&payload.name),
            mime_type: payload.mime_type,
            size: payload.size,
            category: payload.category,
            created_at: Utc::now(),
        };

        let stored = self.documents.insert(document)?;
        self.record_audit(
            &company,
            "document.uploaded",
            json!({
                "document_id": stored.id,
                "category": stored.category.label(),
            }),
        )?;
        self.notify_best_effort(notify::document_uploaded(
            company.owner.clone(),
            &stored.name,
        ));
        self.on_company_data_change(id, CompanyChange::DocumentAdded)?;
        Ok(stored)
    }

    /// Remove an uploaded document. Deletion is quiet: no notification,
    /// just audit and recomputation.
    pub fn remove_document(
        &self,
        id: &CompanyId,
        document_id: &str,
    ) -> Result<(), FundraisingServiceError> {
        let company = self.fetch_company(id)?;
        self.documents.remove(id, document_id)?;
        self.record_audit(
            &company,
            "document.deleted",
            json!({ "document_id": document_id }),
        )?;
        self.on_company_data_change(id, CompanyChange::DocumentRemoved)?;
        Ok(())
    }

    /// Change-trigger coordinator: the single seam every score-affecting
    /// mutation flows through after its write has committed. Recomputes the
    /// score for observability and hands it to the registered hooks; nothing
    /// is persisted here.
    pub fn on_company_data_change(
        &self,
        id: &CompanyId,
        change: CompanyChange,
    ) -> Result<(), FundraisingServiceError> {
        let company = self.fetch_company(id)?;
        let document_count = self.documents.count_for_company(id)?;
        let score = scoring::calculate(&company, document_count);

        info!(
            company = %company.id.0,
            change = change.label(),
            score = score.score,
            "investability score recomputed"
        );

        self.trigger.fire(&company, change, &score);
        Ok(())
    }

    /// Score-delta announcement primitive. Deliberately not wired into any
    /// mutation path; callers opt in explicitly.
    pub fn notify_score_improvement(
        &self,
        id: &CompanyId,
        previous: u8,
        current: u8,
    ) -> Result<Notification, FundraisingServiceError> {
        let company = self.fetch_company(id)?;
        let notification = self
            .notifications
            .publish(notify::score_improved(company.owner, previous, current))?;
        Ok(notification)
    }

    /// Retention cleanup for read notifications older than the cutoff.
    pub fn prune_notifications(
        &self,
        older_than: DateTime<Utc>,
    ) -> Result<u32, FundraisingServiceError> {
        Ok(self.notifications.prune_read(older_than)?)
    }

    fn fetch_company(&self, id: &CompanyId) -> Result<Company, FundraisingServiceError> {
        let company = self.companies.fetch(id)?.ok_or(StoreError::NotFound)?;
        Ok(company)
    }

    fn record_audit(
        &self,
        company: &Company,
        action: &str,
        metadata: serde_json::Value,
    ) -> Result<(), AuditError> {
        self.audit.record(AuditEvent {
            user: company.owner.clone(),
            action: action.to_string(),
            resource: format!("company/{}", company.id.0),
            metadata,
            at: Utc::now(),
        })
    }

    fn notify_best_effort(&self, draft: notify::NotificationDraft) {
        // Delivery failure must not abort the mutation that already
        // committed; log and continue.
        if let Err(err) = self.notifications.publish(draft) {
            warn!(error = %err, "notification delivery failed");
        }
    }
}

/// Error raised by the fundraising service.
#[derive(Debug, thiserror::Error)]
pub enum FundraisingServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0} already completed")]
    AlreadyDone(&'static str),
    #[error("invalid company profile: {0}")]
    InvalidProfile(String),
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}
