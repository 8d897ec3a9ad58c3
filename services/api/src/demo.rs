use crate::infra::{AuditTrail, CompanyDirectory, DocumentShelf, NotificationOutbox};
use clap::Args;
use raiseready::error::AppError;
use raiseready::workflows::fundraising::{
    Company, DocumentCategory, FundraisingService, InvestabilityScore, NewCompany, NewDocument,
    Sector, UserId,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Annual revenue for the sample company, in USD
    #[arg(long, default_value_t = 500_000.0)]
    pub(crate) revenue: f64,
    /// Number of sample documents to upload to the data room
    #[arg(long, default_value_t = 3)]
    pub(crate) documents: u32,
    /// Skip the financial-link step to leave the checklist partially open
    #[arg(long)]
    pub(crate) skip_financials: bool,
}

const SAMPLE_DOCUMENTS: &[(&str, DocumentCategory)] = &[
    ("pitch-deck.pdf", DocumentCategory::PitchDeck),
    ("financial-statements.xlsx", DocumentCategory::FinancialStatements),
    ("business-plan.docx", DocumentCategory::BusinessPlan),
    ("incorporation.pdf", DocumentCategory::LegalDocuments),
    ("cap-table.xlsx", DocumentCategory::Other),
];

type DemoService =
    FundraisingService<CompanyDirectory, DocumentShelf, NotificationOutbox, AuditTrail>;

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        revenue,
        documents,
        skip_financials,
    } = args;

    let outbox = Arc::new(NotificationOutbox::default());
    let trail = Arc::new(AuditTrail::default());
    let service: DemoService = FundraisingService::new(
        Arc::new(CompanyDirectory::default()),
        Arc::new(DocumentShelf::default()),
        outbox.clone(),
        trail.clone(),
    );

    println!("Fundraising readiness demo");

    let company = service.onboard_company(NewCompany {
        owner: UserId("demo-founder".to_string()),
        name: "Northwind Robotics".to_string(),
        sector: Sector::Deeptech,
        target_raise: 2_000_000.0,
        revenue,
    })?;
    render_step(&service, &company, "Company onboarded")?;

    let verified = service.verify_kyc(&company.id)?;
    render_step(&service, &verified, "KYC verified")?;

    if skip_financials {
        println!("\n(skipping financial link)");
    } else {
        let linked = service.link_financials(&company.id)?;
        render_step(&service, &linked, "Financial accounts linked")?;
    }

    for index in 0..documents.min(SAMPLE_DOCUMENTS.len() as u32) {
        let (name, category) = SAMPLE_DOCUMENTS[index as usize];
        let mime_type = mime_guess::from_path(name)
            .first_or_octet_stream()
            .to_string();
        service.add_document(
            &company.id,
            NewDocument {
                name: name.to_string(),
                mime_type,
                size: 32_768,
                category,
            },
        )?;
    }
    if documents > 0 {
        render_step(&service, &company, "Data room populated")?;
    }

    let checklist = service.recommendations(&company.id)?;
    if checklist.is_empty() {
        println!("\nChecklist complete: this profile is fully optimized.");
    } else {
        println!("\nRemaining recommendations:");
        for entry in checklist {
            println!("  - {entry}");
        }
    }

    let delivered = outbox.delivered();
    println!("\nNotifications delivered ({}):", delivered.len());
    for notification in delivered {
        println!("  [{}] {}", notification.kind.label(), notification.message);
    }

    let events = trail.events();
    println!("Audit trail ({} entries):", events.len());
    for event in events {
        println!("  {} on {}", event.action, event.resource);
    }

    Ok(())
}

fn render_step(service: &DemoService, company: &Company, heading: &str) -> Result<(), AppError> {
    let score = service.calculate_score(&company.id)?;
    println!("\n{heading}");
    render_score(&score);
    Ok(())
}

fn render_score(score: &InvestabilityScore) {
    println!("  investability score: {}/100", score.score);
    println!(
        "  breakdown: kyc {} | financials {} | documents {} | revenue {}",
        score.breakdown.kyc_verified,
        score.breakdown.financials_linked,
        score.breakdown.documents_uploaded,
        score.breakdown.revenue_score
    );
}
