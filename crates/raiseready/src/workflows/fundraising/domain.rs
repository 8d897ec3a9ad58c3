use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier wrapper for platform users (founders).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for onboarded companies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub String);

/// Fixed sector taxonomy captured during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Fintech,
    Healthtech,
    Saas,
    Ecommerce,
    Deeptech,
    Climate,
    Edtech,
    Biotech,
    Consumer,
    Other,
}

impl Sector {
    pub const fn label(self) -> &'static str {
        match self {
            Sector::Fintech => "fintech",
            Sector::Healthtech => "healthtech",
            Sector::Saas => "saas",
            Sector::Ecommerce => "ecommerce",
            Sector::Deeptech => "deeptech",
            Sector::Climate => "climate",
            Sector::Edtech => "edtech",
            Sector::Biotech => "biotech",
            Sector::Consumer => "consumer",
            Sector::Other => "other",
        }
    }
}

/// Onboarded company profile: verification flags plus the financial inputs
/// the scoring engine reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub owner: UserId,
    pub name: String,
    pub sector: Sector,
    pub target_raise: f64,
    pub revenue: f64,
    pub kyc_verified: bool,
    pub financials_linked: bool,
    pub created_at: DateTime<Utc>,
}

/// Data-room document categories. Used for organizational filtering only;
/// scoring counts documents regardless of category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    PitchDeck,
    FinancialStatements,
    BusinessPlan,
    LegalDocuments,
    Other,
}

impl DocumentCategory {
    pub const fn label(self) -> &'static str {
        match self {
            DocumentCategory::PitchDeck => "pitch_deck",
            DocumentCategory::FinancialStatements => "financial_statements",
            DocumentCategory::BusinessPlan => "business_plan",
            DocumentCategory::LegalDocuments => "legal_documents",
            DocumentCategory::Other => "other",
        }
    }
}

/// Metadata for a data-room upload. Created on upload, destroyed on delete,
/// never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub company_id: CompanyId,
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub category: DocumentCategory,
    pub created_at: DateTime<Utc>,
}

/// Severity channel for user-facing notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationType {
    pub const fn label(self) -> &'static str {
        match self {
            NotificationType::Info => "info",
            NotificationType::Success => "success",
            NotificationType::Warning => "warning",
            NotificationType::Error => "error",
        }
    }
}

/// A delivered notification as stored by the sink. `read_at` is the only
/// mutable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub user: UserId,
    pub kind: NotificationType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn mark_read(&mut self, at: DateTime<Utc>) {
        if self.read_at.is_none() {
            self.read_at = Some(at);
        }
    }

    /// Retention cleanup only removes notifications that were already read
    /// and have outlived the configured age.
    pub fn is_prunable(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.read_at.is_some() && now.signed_duration_since(self.created_at) > max_age
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn notification(read: bool) -> Notification {
        Notification {
            id: 1,
            user: UserId("user-1".to_string()),
            kind: NotificationType::Info,
            message: "hello".to_string(),
            title: None,
            data: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
            read_at: read.then(|| Utc.with_ymd_and_hms(2025, 1, 2, 12, 0, 0).unwrap()),
        }
    }

    #[test]
    fn unread_notifications_are_never_prunable() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert!(!notification(false).is_prunable(now, Duration::days(30)));
    }

    #[test]
    fn read_notifications_prune_only_after_max_age() {
        let subject = notification(true);
        let young = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
        let old = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        assert!(!subject.is_prunable(young, Duration::days(30)));
        assert!(subject.is_prunable(old, Duration::days(30)));
    }

    #[test]
    fn mark_read_is_first_write_wins() {
        let mut subject = notification(false);
        let first = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        subject.mark_read(first);
        subject.mark_read(second);
        assert_eq!(subject.read_at, Some(first));
    }

    #[test]
    fn sector_labels_follow_wire_names() {
        assert_eq!(Sector::Fintech.label(), "fintech");
        assert_eq!(Sector::Other.label(), "other");
        let json = serde_json::to_string(&Sector::Deeptech).expect("sector serializes");
        assert_eq!(json, "\"deeptech\"");
    }
}
