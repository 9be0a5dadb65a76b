use crate::infra::{AppState, RentalServices};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Extension;
use axum::Json;
use rental_hub::bookings::booking_router;
use rental_hub::listings::listing_router;
use serde_json::json;

pub(crate) fn with_rental_routes(services: RentalServices) -> axum::Router {
    listing_router(services.listings)
        .merge(booking_router(services.bookings))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{build_services, seed_demo_accounts};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use rental_hub::caller::{CALLER_ID_HEADER, CALLER_ROLE_HEADER};
    use rental_hub::config::PolicyConfig;
    use rental_hub::store::InMemoryStore;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        }
    }

    async fn read_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let state = app_state(false);
        let router = with_rental_routes(build_services(
            Arc::new(InMemoryStore::new()),
            PolicyConfig::default(),
        ))
        .layer(Extension(state.clone()));

        let initializing = router
            .clone()
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(initializing.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.readiness.store(true, Ordering::Release);
        let ready = router
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(ready.status(), StatusCode::OK);
        assert_eq!(read_json(ready).await["status"], "ready");
    }

    #[tokio::test]
    async fn merged_router_serves_listings_and_bookings() {
        let store = Arc::new(InMemoryStore::new());
        let accounts = seed_demo_accounts(&store).await.expect("accounts seeded");
        let router = with_rental_routes(build_services(store, PolicyConfig::default()))
            .layer(Extension(app_state(true)));

        let listings = router
            .clone()
            .oneshot(
                Request::get("/api/v1/listings")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(listings.status(), StatusCode::OK);
        assert_eq!(read_json(listings).await["data"]["metadata"]["total"], 0);

        let bookings = router
            .oneshot(
                Request::get("/api/v1/bookings")
                    .header(CALLER_ID_HEADER, accounts.admin.id.to_hex())
                    .header(CALLER_ROLE_HEADER, "admin")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(bookings.status(), StatusCode::OK);
        let payload = read_json(bookings).await;
        assert_eq!(payload["message"], "Bookings retrieved successfully");
        assert_eq!(payload["data"]["bookings"], json!([]));
    }

    #[tokio::test]
    async fn health_and_metrics_are_exposed() {
        let router = with_rental_routes(build_services(
            Arc::new(InMemoryStore::new()),
            PolicyConfig::default(),
        ))
        .layer(Extension(app_state(true)));

        let health = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(health.status(), StatusCode::OK);

        let metrics = router
            .oneshot(Request::get("/metrics").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(metrics.status(), StatusCode::OK);
        assert_eq!(
            metrics.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }
}
