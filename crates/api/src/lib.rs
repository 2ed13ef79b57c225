//! Churn Prediction API Server
//!
//! REST serving surface over the encode -> predict pipeline.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use churn_inference::Predictor;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod rate_limit;
mod routes;
mod settings;

pub use rate_limit::{create_governor_config, RateLimitConfig};
pub use settings::Settings;

/// Application state shared across handlers
///
/// Everything in here is immutable after startup, so handlers share it
/// through a plain `Arc` with no locking.
pub struct AppState {
    /// Prediction front-end over the loaded classifier
    pub predictor: Predictor,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state around a ready predictor
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: ComponentStatus,
}

/// Component status
#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    pub classifier: ComponentHealth,
}

/// Individual component health
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: String,
    pub feature_count: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/predict", post(routes::predict::submit_profile))
        .route("/api/v1/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        components: ComponentStatus {
            classifier: ComponentHealth {
                status: "loaded".to_string(),
                feature_count: state.predictor.feature_count(),
            },
        },
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server, rate limiting requests by peer IP
pub async fn run_server(
    settings: &Settings,
    predictor: Predictor,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(predictor));
    let governor = create_governor_config(&RateLimitConfig::default());
    let app = create_router(state).layer(tower_governor::GovernorLayer { config: governor });

    info!("Starting API server on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use churn_inference::{Classifier, InferenceError};
    use tower::util::ServiceExt;

    struct StubClassifier {
        label: u8,
        probabilities: [f64; 2],
    }

    impl Classifier for StubClassifier {
        fn feature_count(&self) -> usize {
            feature_encoder::FEATURE_DIMENSION
        }

        fn predict_label(&self, _features: &[f64]) -> Result<u8, InferenceError> {
            Ok(self.label)
        }

        fn predict_probabilities(&self, _features: &[f64]) -> Result<[f64; 2], InferenceError> {
            Ok(self.probabilities)
        }
    }

    fn test_router(label: u8, probabilities: [f64; 2]) -> Router {
        let predictor = Predictor::new(Arc::new(StubClassifier {
            label,
            probabilities,
        }));
        create_router(Arc::new(AppState::new(predictor)))
    }

    fn profile_json() -> serde_json::Value {
        serde_json::json!({
            "CustomerName": "Dana",
            "SeniorCitizen": 0,
            "MonthlyCharges": 70.35,
            "TotalCharges": 151.65,
            "Gender": "Female",
            "Partner": "No",
            "Dependents": "No",
            "PhoneService": "Yes",
            "MultipleLines": "No",
            "InternetService": "Fiber optic",
            "OnlineSecurity": "No",
            "OnlineBackup": "No",
            "DeviceProtection": "No",
            "TechSupport": "No",
            "StreamingTV": "Yes",
            "StreamingMovies": "No",
            "Contract": "Month-to-month",
            "PaperlessBilling": "Yes",
            "PaymentMethod": "Electronic check",
            "TenureGroup": "1 - 12"
        })
    }

    async fn post_predict(
        router: Router,
        payload: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/predict")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_predict_returns_risk_and_churn_probability() {
        let (status, body) = post_predict(test_router(1, [0.13, 0.87]), profile_json()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["risk"], "high");
        assert!((body["probability"].as_f64().unwrap() - 0.87).abs() < 1e-9);
        assert!(body["message"].as_str().unwrap().contains("Dana"));
    }

    #[tokio::test]
    async fn test_predict_rejects_out_of_domain_value() {
        let mut payload = profile_json();
        payload["InternetService"] = "Cable".into();
        let (status, body) = post_predict(test_router(0, [0.8, 0.2]), payload).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["attribute"], "InternetService");
        assert_eq!(body["value"], "Cable");
    }

    #[tokio::test]
    async fn test_predict_without_name_still_answers() {
        let mut payload = profile_json();
        payload.as_object_mut().unwrap().remove("CustomerName");
        let (status, body) = post_predict(test_router(0, [0.6, 0.4]), payload).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["risk"], "low");
        assert!((body["probability"].as_f64().unwrap() - 0.4).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_health_reports_loaded_classifier() {
        let response = test_router(0, [0.9, 0.1])
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["components"]["classifier"]["status"], "loaded");
        assert_eq!(body["components"]["classifier"]["feature_count"], 50);
    }
}
