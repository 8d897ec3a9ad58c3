use super::super::domain::Company;
use super::{DOCUMENT_POINTS_CAP, POINTS_PER_DOCUMENT, REVENUE_CEILING};

const MAX_SCORED_DOCUMENTS: u32 = DOCUMENT_POINTS_CAP / POINTS_PER_DOCUMENT;

/// Improvement checklist derived from the same state the scoring engine
/// reads. The entry order is fixed; each condition is independent, so a fully
/// optimized company gets an empty list.
pub fn recommendations(company: &Company, document_count: u32) -> Vec<String> {
    let mut checklist = Vec::new();

    if !company.kyc_verified {
        checklist.push("Complete KYC verification to earn 30 points.".to_string());
    }

    if !company.financials_linked {
        checklist.push("Link your bank account to earn 20 points.".to_string());
    }

    if document_count < MAX_SCORED_DOCUMENTS {
        let missing = MAX_SCORED_DOCUMENTS - document_count;
        let noun = if missing == 1 { "document" } else { "documents" };
        checklist.push(format!(
            "Upload {missing} more {noun} to maximize document points."
        ));
    }

    if company.revenue < REVENUE_CEILING {
        checklist
            .push("As your revenue grows, your score will automatically improve.".to_string());
    }

    checklist
}
