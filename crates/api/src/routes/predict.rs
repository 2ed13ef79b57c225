//! Prediction Route

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use churn_inference::{InferenceError, RiskLabel};
use feature_encoder::{encode, CustomerProfile, EncodeError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

use crate::AppState;

/// Prediction request: the customer profile plus an optional display
/// name echoed back in the result banner
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(rename = "CustomerName", default)]
    pub customer_name: Option<String>,
    #[serde(flatten)]
    pub profile: CustomerProfile,
}

/// Prediction response
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub risk: &'static str,
    pub probability: f64,
    pub message: String,
}

/// Error body returned for failed predictions
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ErrorBody {
    fn unavailable() -> Self {
        Self {
            error: "prediction unavailable".to_string(),
            attribute: None,
            value: None,
        }
    }
}

/// Failures a prediction request can surface
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            PredictError::Encode(EncodeError::InvalidAttributeValue { attribute, value }) => {
                warn!("Rejected profile: {} = {:?} is not admissible", attribute, value);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorBody {
                        error: "invalid attribute value".to_string(),
                        attribute: Some(attribute),
                        value: Some(value),
                    },
                )
            }
            PredictError::Inference(err @ InferenceError::FeatureShapeMismatch { .. }) => {
                error!("Encoder/classifier schema drift: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::unavailable())
            }
            PredictError::Inference(err) => {
                error!("Classifier failure: {}", err);
                (StatusCode::BAD_GATEWAY, ErrorBody::unavailable())
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Submit a customer profile for churn prediction
pub async fn submit_profile(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, PredictError> {
    let vector = encode(&request.profile)?;
    let prediction = state.predictor.predict(&vector)?;

    let name = request.customer_name.as_deref().unwrap_or("this customer");
    let message = match prediction.risk {
        RiskLabel::High => format!(
            "High risk of {} to churn (probability {:.2}%)",
            name,
            prediction.probability * 100.0
        ),
        RiskLabel::Low => format!(
            "Low risk of {} to churn (probability {:.2}%)",
            name,
            prediction.probability * 100.0
        ),
    };

    Ok(Json(PredictResponse {
        risk: prediction.risk.as_str(),
        probability: prediction.probability,
        message,
    }))
}
