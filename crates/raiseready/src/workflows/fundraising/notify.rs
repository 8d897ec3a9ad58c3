//! Catalog of the notification payloads the mutation paths emit. Keeping the
//! copy in one place means the texts the dashboard shows stay in lockstep
//! with the point values in [`super::scoring`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::domain::{NotificationType, UserId};

/// Payload handed to a [`super::repository::NotificationSink`]. The sink
/// assigns identity and timestamps on delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationDraft {
    pub user: UserId,
    pub kind: NotificationType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Emitted once, on the first successful KYC verification.
pub fn kyc_verified(user: UserId) -> NotificationDraft {
    NotificationDraft {
        user,
        kind: NotificationType::Success,
        message: "KYC verification completed, +30 points".to_string(),
        title: Some("KYC verified".to_string()),
        data: None,
    }
}

/// Emitted once, on the first successful financial account link.
pub fn financials_linked(user: UserId) -> NotificationDraft {
    NotificationDraft {
        user,
        kind: NotificationType::Success,
        message: "Financial accounts linked, +20 points".to_string(),
        title: Some("Financials linked".to_string()),
        data: None,
    }
}

/// Emitted on every data-room upload, naming the document.
pub fn document_uploaded(user: UserId, document_name: &str) -> NotificationDraft {
    NotificationDraft {
        user,
        kind: NotificationType::Info,
        message: format!("{document_name} was added to your data room"),
        title: Some("Document uploaded".to_string()),
        data: Some(json!({ "document": document_name })),
    }
}

/// Score-delta announcement. Callable primitive only: no mutation path wires
/// this in today.
pub fn score_improved(user: UserId, previous: u8, current: u8) -> NotificationDraft {
    NotificationDraft {
        user,
        kind: NotificationType::Success,
        message: format!("Your investability score improved from {previous} to {current}"),
        title: Some("Score improved".to_string()),
        data: Some(json!({ "previous": previous, "current": current })),
    }
}
