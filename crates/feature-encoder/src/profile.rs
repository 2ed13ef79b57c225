//! Customer Profile Record

use serde::{Deserialize, Serialize};

/// Customer attributes as collected by the caller
///
/// Wire names follow the training schema (`SeniorCitizen`, `MonthlyCharges`,
/// `StreamingTV`, ...). Categorical values are carried verbatim as received;
/// domain validation belongs to the encoder, which rejects anything outside
/// the training-time value lists. A profile lives for one prediction request
/// and is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerProfile {
    pub senior_citizen: u8,
    pub monthly_charges: f64,
    pub total_charges: f64,
    pub gender: String,
    pub partner: String,
    pub dependents: String,
    pub phone_service: String,
    pub multiple_lines: String,
    pub internet_service: String,
    pub online_security: String,
    pub online_backup: String,
    pub device_protection: String,
    pub tech_support: String,
    #[serde(rename = "StreamingTV")]
    pub streaming_tv: String,
    pub streaming_movies: String,
    pub contract: String,
    pub paperless_billing: String,
    pub payment_method: String,
    pub tenure_group: String,
}
