//! Churn Prediction Service - Main Entry Point

use api::{init_logging, run_server, Settings};
use churn_inference::{OnnxClassifier, Predictor};
use feature_encoder::FEATURE_DIMENSION;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== Churn Prediction Service v{} ===", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load()?;
    info!("Loading classifier artifact from {}", settings.model_path);

    // Startup precondition: without a loaded classifier the service must
    // refuse to start rather than serve failing predictions.
    let classifier = OnnxClassifier::load(&settings.model_path, FEATURE_DIMENSION)?;
    let predictor = Predictor::new(Arc::new(classifier));

    run_server(&settings, predictor).await?;

    Ok(())
}
