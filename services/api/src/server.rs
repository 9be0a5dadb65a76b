use crate::cli::ServeArgs;
use crate::infra::{build_services, seed_demo_accounts, AppState};
use crate::routes::with_rental_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rental_hub::config::AppConfig;
use rental_hub::error::AppError;
use rental_hub::store::InMemoryStore;
use rental_hub::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryStore::new());
    if args.seed_demo {
        seed_demo_accounts(&store).await?;
    }
    let services = build_services(store, config.policy);

    let app = with_rental_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        ownership = config.policy.ownership.label(),
        transitions = config.policy.transitions.label(),
        "rental hub ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
