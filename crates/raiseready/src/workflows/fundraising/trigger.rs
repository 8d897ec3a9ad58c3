use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::Company;
use super::scoring::InvestabilityScore;

/// The mutations that can affect a company's score. Every one of them must
/// flow through the trigger seam after its write has been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyChange {
    KycVerified,
    FinancialsLinked,
    FinancialsUnlinked,
    DocumentAdded,
    DocumentRemoved,
    Manual,
}

impl CompanyChange {
    pub const fn label(self) -> &'static str {
        match self {
            CompanyChange::KycVerified => "kyc_verified",
            CompanyChange::FinancialsLinked => "financials_linked",
            CompanyChange::FinancialsUnlinked => "financials_unlinked",
            CompanyChange::DocumentAdded => "document_added",
            CompanyChange::DocumentRemoved => "document_removed",
            CompanyChange::Manual => "manual",
        }
    }
}

/// Hook invoked after a score-affecting mutation has been persisted and the
/// score recomputed. Cache invalidation, delta notifications, and analytics
/// attach here rather than at each mutation call site.
pub trait ChangeHook: Send + Sync {
    fn after_change(&self, company: &Company, change: CompanyChange, score: &InvestabilityScore);
}

/// Ordered list of hooks fired by the service's change coordinator. Hooks run
/// synchronously in registration order; none of them can veto the mutation
/// that already committed.
#[derive(Default, Clone)]
pub struct ChangeTrigger {
    hooks: Vec<Arc<dyn ChangeHook>>,
}

impl ChangeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook(mut self, hook: Arc<dyn ChangeHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn register(&mut self, hook: Arc<dyn ChangeHook>) {
        self.hooks.push(hook);
    }

    pub(crate) fn fire(
        &self,
        company: &Company,
        change: CompanyChange,
        score: &InvestabilityScore,
    ) {
        for hook in &self.hooks {
            hook.after_change(company, change, score);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}
