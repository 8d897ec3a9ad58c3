use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use raiseready::workflows::fundraising::{
    AuditError, AuditEvent, AuditSink, ChangeHook, Company, CompanyId, CompanyStore,
    CompanyChange, Document, DocumentStore, InvestabilityScore, Notification, NotificationDraft,
    NotificationSink, NotifyError, StoreError,
};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory company directory enforcing the one-company-per-user rule.
#[derive(Default)]
pub(crate) struct CompanyDirectory {
    records: Mutex<HashMap<CompanyId, Company>>,
}

impl CompanyStore for CompanyDirectory {
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
        if guard.contains_key(&company.id) {
            guard.insert(company.id.clone(), company);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }
}

/// In-memory data-room metadata shelf.
#[derive(Default)]
pub(crate) struct DocumentShelf {
    records: Mutex<HashMap<CompanyId, Vec<Document>>>,
}

impl DocumentStore for DocumentShelf {
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

/// In-memory notification outbox with retention cleanup.
#[derive(Default)]
pub(crate) struct NotificationOutbox {
    sequence: Mutex<u64>,
    delivered: Mutex<Vec<Notification>>,
}

impl NotificationOutbox {
    pub(crate) fn delivered(&self) -> Vec<Notification> {
        self.delivered
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }
}

impl NotificationSink for NotificationOutbox {
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

    fn prune_read(&self, older_than: DateTime<Utc>) -> Result<u32, NotifyError> {
        let mut guard = self.delivered.lock().expect("notification mutex poisoned");
        let before = guard.len();
        guard.retain(|item| !(item.read_at.is_some() && item.created_at < older_than));
        Ok((before - guard.len()) as u32)
    }
}

/// Append-only in-memory audit trail.
#[derive(Default)]
pub(crate) struct AuditTrail {
    events: Mutex<Vec<AuditEvent>>,
}

impl AuditTrail {
    pub(crate) fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditSink for AuditTrail {
    fn record(&self, event: AuditEvent) -> Result<(), AuditError> {
        self.events
            .lock()
            .expect("audit mutex poisoned")
            .push(event);
        Ok(())
    }
}

/// Change hook wired into the service at startup: a debug-level trace per
/// recomputation, useful when tailing the service during demos.
pub(crate) struct ScoreTraceHook;

impl ChangeHook for ScoreTraceHook {
    fn after_change(&self, company: &Company, change: CompanyChange, score: &InvestabilityScore) {
        debug!(
            company = %company.id.0,
            change = change.label(),
            score = score.score,
            "change hook observed recomputation"
        );
    }
}
