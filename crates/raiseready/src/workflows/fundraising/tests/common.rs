use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::workflows::fundraising::domain::{
    Company, CompanyId, Document, DocumentCategory, Notification, Sector, UserId,
};
use crate::workflows::fundraising::notify::NotificationDraft;
use crate::workflows::fundraising::repository::{
    AuditError, AuditEvent, AuditSink, CompanyStore, DocumentStore, NotificationSink, NotifyError,
    StoreError,
};
use crate::workflows::fundraising::service::{FundraisingService, NewCompany, NewDocument};
use crate::workflows::fundraising::trigger::ChangeTrigger;

pub(super) type MemoryService =
    FundraisingService<MemoryCompanies, MemoryDocuments, MemoryNotifications, MemoryAudit>;

pub(super) fn owner(suffix: &str) -> UserId {
    UserId(format!("founder-{suffix}"))
}

pub(super) fn new_company(suffix: &str) -> NewCompany {
    NewCompany {
        owner: owner(suffix),
        name: format!("Acme {suffix}"),
        sector: Sector::Saas,
        target_raise: 750_000.0,
        revenue: 0.0,
    }
}

pub(super) fn company(suffix: &str, revenue: f64, kyc: bool, financials: bool) -> Company {
    Company {
        id: CompanyId(format!("co-fixed-{suffix}")),
        owner: owner(suffix),
        name: format!("Acme {suffix}"),
        sector: Sector::Fintech,
        target_raise: 500_000.0,
        revenue,
        kyc_verified: kyc,
        financials_linked: financials,
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).single().expect("valid date"),
    }
}

pub(super) fn pitch_deck() -> NewDocument {
    NewDocument {
        name: "Pitch Deck v3.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        size: 48_231,
        category: DocumentCategory::PitchDeck,
    }
}

pub(super) fn build_service() -> (
    MemoryService,
    Arc<MemoryCompanies>,
    Arc<MemoryDocuments>,
    Arc<MemoryNotifications>,
    Arc<MemoryAudit>,
) {
    build_service_with_trigger(ChangeTrigger::new())
}

pub(super) fn build_service_with_trigger(
    trigger: ChangeTrigger,
) -> (
    MemoryService,
    Arc<MemoryCompanies>,
    Arc<MemoryDocuments>,
    Arc<MemoryNotifications>,
    Arc<MemoryAudit>,
) {
    let companies = Arc::new(MemoryCompanies::default());
    let documents = Arc::new(MemoryDocuments::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let audit = Arc::new(MemoryAudit::default());
    let service = FundraisingService::with_trigger(
        companies.clone(),
        documents.clone(),
        notifications.clone(),
        audit.clone(),
        trigger,
    );
    (service, companies, documents, notifications, audit)
}

/// Seed a company directly into the store, bypassing onboarding, so tests can
/// set the verification flags and revenue precisely.
pub(super) fn seed_company(
    companies: &MemoryCompanies,
    suffix: &str,
    revenue: f64,
    kyc: bool,
    financials: bool,
) -> CompanyId {
    let seeded = company(suffix, revenue, kyc, financials);
    let id = seeded.id.clone();
    companies.insert(seeded).expect("seed insert succeeds");
    id
}

#[derive(Default)]
pub(super) struct MemoryCompanies {
    records: Mutex<HashMap<CompanyId, Company>>,
}

impl CompanyStore for MemoryCompanies {
    fn insert(&self, company: Company) -> Result<Company, StoreError> {
        let mut guard = self.records.lock().expect("company mutex poisoned");
        if guard.values().any(|existing| existing.owner == company.owner) {
            return Err(StoreError::Conflict);
        }
        guard.insert(company.id.clone(), company.clone());
        Ok(company)
    }

    fn fetch(&self, id: &CompanyId) -> Result<Option<Company>, StoreError> {
        let guard = self.records.lock().expect("company mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, company: Company) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("company mutex poisoned");
        if !guard.contains_key(&company.id) {
            return Err(StoreError::NotFound);
        }
        guard.insert(company.id.clone(), company);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryDocuments {
    records: Mutex<HashMap<CompanyId, Vec<Document>>>,
}

impl DocumentStore for MemoryDocuments {
    fn count_for_company(&self, id: &CompanyId) -> Result<u32, StoreError> {
        let guard = self.records.lock().expect("document mutex poisoned");
        Ok(guard.get(id).map_or(0, |docs| docs.len() as u32))
    }

    fn insert(&self, document: Document) -> Result<Document, StoreError> {
        let mut guard = self.records.lock().expect("document mutex poisoned");
        guard
            .entry(document.company_id.clone())
            .or_default()
            .push(document.clone());
        Ok(document)
    }

    fn remove(&self, company_id: &CompanyId, document_id: &str) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("document mutex poisoned");
        let documents = guard.get_mut(company_id).ok_or(StoreError::NotFound)?;
        let before = documents.len();
        documents.retain(|doc| doc.id != document_id);
        if documents.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifications {
    sequence: Mutex<u64>,
    delivered: Mutex<Vec<Notification>>,
}

impl MemoryNotifications {
    pub(super) fn delivered(&self) -> Vec<Notification> {
        self.delivered
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }

    pub(super) fn mark_all_read(&self, at: chrono::DateTime<Utc>) {
        let mut guard = self.delivered.lock().expect("notification mutex poisoned");
        for item in guard.iter_mut() {
            item.mark_read(at);
        }
    }
}

impl NotificationSink for MemoryNotifications {
    fn publish(&self, draft: NotificationDraft) -> Result<Notification, NotifyError> {
        let mut sequence = self.sequence.lock().expect("sequence mutex poisoned");
        *sequence += 1;
        let notification = Notification {
            id: *sequence,
            user: draft.user,
            kind: draft.kind,
            message: draft.message,
            title: draft.title,
            data: draft.data,
            created_at: Utc::now(),
            read_at: None,
        };
        self.delivered
            .lock()
            .expect("notification mutex poisoned")
            .push(notification.clone());
        Ok(notification)
    }

    fn prune_read(&self, older_than: chrono::DateTime<Utc>) -> Result<u32, NotifyError> {
        let mut guard = self.delivered.lock().expect("notification mutex poisoned");
        let before = guard.len();
        guard.retain(|item| !(item.read_at.is_some() && item.created_at < older_than));
        Ok((before - guard.len()) as u32)
    }
}

/// Sink whose deliveries always fail, for exercising the best-effort path.
#[derive(Default)]
pub(super) struct FailingNotifications;

impl NotificationSink for FailingNotifications {
    fn publish(&self, _draft: NotificationDraft) -> Result<Notification, NotifyError> {
        Err(NotifyError::Transport("outbox offline".to_string()))
    }

    fn prune_read(&self, _older_than: chrono::DateTime<Utc>) -> Result<u32, NotifyError> {
        Err(NotifyError::Transport("outbox offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryAudit {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryAudit {
    pub(super) fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditSink for MemoryAudit {
    fn record(&self, event: AuditEvent) -> Result<(), AuditError> {
        self.events
            .lock()
            .expect("audit mutex poisoned")
            .push(event);
        Ok(())
    }
}

/// Store that reports the backing database as offline.
pub(super) struct UnavailableCompanies;

impl CompanyStore for UnavailableCompanies {
    fn insert(&self, _company: Company) -> Result<Company, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &CompanyId) -> Result<Option<Company>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _company: Company) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
