use super::common::*;
use crate::workflows::fundraising::scoring::recommendations;

#[test]
fn brand_new_company_gets_all_four_recommendations_in_order() {
    let subject = company("fresh", 0.0, false, false);
    let checklist = recommendations(&subject, 0);

    assert_eq!(
        checklist,
        vec![
            "Complete KYC verification to earn 30 points.".to_string(),
            "Link your bank account to earn 20 points.".to_string(),
            "Upload 5 more documents to maximize document points.".to_string(),
            "As your revenue grows, your score will automatically improve.".to_string(),
        ]
    );
}

#[test]
fn fully_optimized_company_gets_an_empty_checklist() {
    let subject = company("done", 1_500_000.0, true, true);
    assert!(recommendations(&subject, 7).is_empty());
}

#[test]
fn document_wording_switches_to_singular_for_one_missing() {
    let subject = company("singular", 1_500_000.0, true, true);
    let checklist = recommendations(&subject, 4);
    assert_eq!(
        checklist,
        vec!["Upload 1 more document to maximize document points.".to_string()]
    );
}

#[test]
fn conditions_are_independent() {
    let subject = company("partial", 2_000_000.0, false, true);
    let checklist = recommendations(&subject, 5);
    assert_eq!(
        checklist,
        vec!["Complete KYC verification to earn 30 points.".to_string()]
    );
}

#[test]
fn revenue_line_appears_below_one_million() {
    let subject = company("grower", 999_999.0, true, true);
    let checklist = recommendations(&subject, 5);
    assert_eq!(
        checklist,
        vec!["As your revenue grows, your score will automatically improve.".to_string()]
    );
}
