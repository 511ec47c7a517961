use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCheckinRepository, InMemorySignalSink};
use crate::routes::with_checkin_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use vitality::checkin::{CheckinService, LifestyleScorer};
use vitality::config::AppConfig;
use vitality::error::AppError;
use vitality::telemetry;

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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryCheckinRepository::default());
    let signals = Arc::new(InMemorySignalSink::default());
    let checkin_service = Arc::new(
        CheckinService::new(
            repository,
            signals,
            LifestyleScorer::new(config.checkin.thresholds),
        )
        .with_history_limit(config.checkin.history_limit),
    );

    let app = with_checkin_routes(checkin_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "vitality check-in service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
