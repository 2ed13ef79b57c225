//! Runtime Settings

use serde::Deserialize;

/// Server settings, layered from an optional `churn.toml` file and
/// `CHURN_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Path to the classifier artifact
    pub model_path: String,
}

impl Settings {
    /// Load settings with file and environment overrides over defaults
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("bind_addr", "0.0.0.0:8080")?
            .set_default("model_path", "model.onnx")?
            .add_source(config::File::with_name("churn").required(false))
            .add_source(config::Environment::with_prefix("CHURN"))
            .build()?
            .try_deserialize()
    }
}
