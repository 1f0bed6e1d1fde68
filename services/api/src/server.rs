use crate::cli::ServeArgs;
use crate::infra::{load_repository, AppState};
use crate::routes::with_admissions_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use society_admin::admissions::InterviewService;
use society_admin::config::AppConfig;
use society_admin::error::AppError;
use society_admin::telemetry;
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
    if let Some(roster) = args.roster.take() {
        config.admissions.roster_path = Some(roster);
    }
    if let Some(locale) = args.locale.take() {
        config.admissions.locale = locale;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = load_repository(config.admissions.roster_path.as_deref())?;
    let interview_service = Arc::new(InterviewService::new(
        repository,
        config.admissions.locale,
    ));

    let app = with_admissions_routes(interview_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        locale = config.admissions.locale.code(),
        "admissions interview service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
