use crate::cli::ServeArgs;
use crate::infra::{AppState, HistoryBackend};
use crate::routes::with_evaluation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use method_eval::config::AppConfig;
use method_eval::error::AppError;
use method_eval::evaluation::EvaluationService;
use method_eval::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(engine) = args.engine.take() {
        config.scoring.engine = engine;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let history = HistoryBackend::open(&config.history)?;
    let history_backend = history.describe();
    let evaluation_service = Arc::new(EvaluationService::new(
        Arc::new(history),
        config.scoring.engine,
    ));

    let app = with_evaluation_routes(evaluation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        engine = config.scoring.engine.label(),
        history = %history_backend,
        "testing method evaluator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
