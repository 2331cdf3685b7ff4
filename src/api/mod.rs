//! Dashboard HTTP API
//!
//! HTTP layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Single-page dashboard
//! - `GET /api/v1/dashboard` - Initial page state
//! - `GET /api/v1/map` - Site map figure
//!
//! ## Sites
//! - `GET /api/v1/sites` - Monitoring sites
//!
//! ## Panels
//! - `GET /api/v1/panels/:panel/options` - Dropdown options
//! - `GET /api/v1/panels/:panel/chart` - Render a chart (`?sites=a,b`)
//! - `POST /api/v1/panels/:panel/selection` - Apply a dropdown change
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use act_water::api::{serve, AppState};
//! use act_water::{Config, DashboardContext};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (config, _) = Config::resolve(None)?;
//!     let context = Arc::new(DashboardContext::load(&config).await?);
//!
//!     let state = AppState::new(context, config.api.clone());
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/dashboard", get(routes::dashboard::snapshot))
        .route("/map", get(routes::dashboard::site_map))
        .route("/sites", get(routes::sites::list_sites))
        .route("/panels/:panel/options", get(routes::panels::list_options))
        .route("/panels/:panel/chart", get(routes::panels::render_chart))
        .route(
            "/panels/:panel/selection",
            post(routes::panels::update_selection),
        );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::dashboard::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::sample_context;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::new(Arc::new(sample_context()), ApiConfig::default());
        build_router(state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_selection(app: Router, panel: &str, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/v1/panels/{}/selection", panel))
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (status, body) = get_json(create_test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["sites"], 3);
        assert_eq!(body["readings"], 6);
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("streamflow_dropdown"));
        assert!(html.contains("rainfall_dropdown"));
        assert!(html.contains("latestRequest"));
    }

    #[tokio::test]
    async fn test_dashboard_snapshot() {
        let (status, body) = get_json(create_test_app(), "/api/v1/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["panels"].as_array().unwrap().len(), 2);
        assert_eq!(
            body["panels"][0]["chart"]["layout"]["title"]["text"],
            "Streamflow at site 410001"
        );
        assert_eq!(body["map"]["layout"]["height"], 800);
    }

    #[tokio::test]
    async fn test_list_sites() {
        let (status, body) = get_json(create_test_app(), "/api/v1/sites").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 3);
        assert_eq!(body["sites"][1]["type"], "570");
    }

    #[tokio::test]
    async fn test_panel_options() {
        let (status, body) =
            get_json(create_test_app(), "/api/v1/panels/rainfall/options").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["options"][0]["label"], "Tuggeranong Creek");
        assert_eq!(body["options"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_panel() {
        let (status, body) =
            get_json(create_test_app(), "/api/v1/panels/evaporation/options").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_render_chart_two_sites() {
        let (status, body) = get_json(
            create_test_app(),
            "/api/v1/panels/streamflow/chart?sites=410001,410002",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_ne!(data[0]["line"]["color"], data[1]["line"]["color"]);
        assert_eq!(body["layout"]["legend"]["orientation"], "h");
    }

    #[tokio::test]
    async fn test_render_chart_without_sites() {
        let (status, body) =
            get_json(create_test_app(), "/api/v1/panels/rainfall/chart").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().unwrap().is_empty());
        assert_eq!(body["layout"]["yaxis"]["title"]["text"], "Rainfall, ");
    }

    #[tokio::test]
    async fn test_selection_scalar_and_list_agree() {
        let (status, scalar) =
            post_selection(create_test_app(), "streamflow", r#"{"value": "410001"}"#).await;
        assert_eq!(status, StatusCode::OK);

        let (_, list) =
            post_selection(create_test_app(), "streamflow", r#"{"value": ["410001"]}"#).await;
        assert_eq!(scalar, list);
        assert_eq!(scalar["selection"], serde_json::json!(["410001"]));
        assert_eq!(
            scalar["chart"]["layout"]["yaxis"]["title"]["text"],
            "Streamflow, Ml/Day"
        );
    }

    #[tokio::test]
    async fn test_selection_cleared() {
        let (status, body) =
            post_selection(create_test_app(), "rainfall", r#"{"value": null}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["chart"]["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_selection_blank_ids_rejected() {
        let (status, body) =
            post_selection(create_test_app(), "streamflow", r#"{"value": ["", "  "]}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_selection_invalid_json() {
        let (status, _) = post_selection(create_test_app(), "rainfall", "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
