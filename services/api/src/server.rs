use crate::cli::ServeArgs;
use crate::infra::{
    AppState, AuditTrail, CompanyDirectory, DocumentShelf, NotificationOutbox, ScoreTraceHook,
};
use crate::routes::with_fundraising_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use raiseready::config::AppConfig;
use raiseready::error::AppError;
use raiseready::telemetry;
use raiseready::workflows::fundraising::{ChangeTrigger, FundraisingService};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let trigger = ChangeTrigger::new().with_hook(Arc::new(ScoreTraceHook));
    let service = Arc::new(FundraisingService::with_trigger(
        Arc::new(CompanyDirectory::default()),
        Arc::new(DocumentShelf::default()),
        Arc::new(NotificationOutbox::default()),
        Arc::new(AuditTrail::default()),
        trigger,
    ));

    let retention = config.retention.clone();
    let pruning_service = service.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(60 * 60));
        loop {
            ticker.tick().await;
            let cutoff = chrono::Utc::now() - retention.max_age();
            match pruning_service.prune_notifications(cutoff) {
                Ok(0) => {}
                Ok(removed) => info!(removed, "pruned read notifications"),
                Err(err) => warn!(error = %err, "notification pruning failed"),
            }
        }
    });

    let app = with_fundraising_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "fundraising readiness service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
