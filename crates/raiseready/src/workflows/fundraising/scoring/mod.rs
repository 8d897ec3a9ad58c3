mod recommend;

pub use recommend::recommendations;

use serde::{Deserialize, Serialize};

use super::domain::Company;

pub(crate) const KYC_POINTS: u8 = 30;
pub(crate) const FINANCIALS_POINTS: u8 = 20;
pub(crate) const POINTS_PER_DOCUMENT: u32 = 5;
pub(crate) const DOCUMENT_POINTS_CAP: u32 = 25;
pub(crate) const REVENUE_POINTS_MAX: f64 = 25.0;
pub(crate) const REVENUE_CEILING: f64 = 1_000_000.0;
const SCORE_CAP: u16 = 100;

/// The four named sub-scores that sum to the investability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub kyc_verified: u8,
    pub financials_linked: u8,
    pub documents_uploaded: u8,
    pub revenue_score: u8,
}

/// Derived 0-100 readiness metric. Recomputed on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestabilityScore {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

/// Pure scoring function over a loaded company and its current data-room
/// document count. Document categories carry no weight here.
pub fn calculate(company: &Company, document_count: u32) -> InvestabilityScore {
    let breakdown = ScoreBreakdown {
        kyc_verified: if company.kyc_verified { KYC_POINTS } else { 0 },
        financials_linked: if company.financials_linked {
            FINANCIALS_POINTS
        } else {
            0
        },
        documents_uploaded: document_points(document_count),
        revenue_score: revenue_points(company.revenue),
    };

    let total = u16::from(breakdown.kyc_verified)
        + u16::from(breakdown.financials_linked)
        + u16::from(breakdown.documents_uploaded)
        + u16::from(breakdown.revenue_score);

    InvestabilityScore {
        // The component maxima already sum to 100; the clamp guards against
        // future weight changes drifting past the contract.
        score: total.min(SCORE_CAP) as u8,
        breakdown,
    }
}

fn document_points(document_count: u32) -> u8 {
    (document_count.saturating_mul(POINTS_PER_DOCUMENT)).min(DOCUMENT_POINTS_CAP) as u8
}

fn revenue_points(revenue: f64) -> u8 {
    let bounded = revenue.clamp(0.0, REVENUE_CEILING);
    // Round half-up: 500_000 -> 12.5 -> 13.
    (bounded / REVENUE_CEILING * REVENUE_POINTS_MAX).round() as u8
}
