//! Feature Vector Assembly

use crate::domains::{self, Domain};
use crate::error::EncodeError;
use crate::profile::CustomerProfile;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of features the classifier expects: three numeric passthroughs
/// followed by the one-hot blocks of the 16 categorical attributes.
pub const FEATURE_DIMENSION: usize = 50;

/// Fixed-order numeric encoding of a customer profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Raw feature values (50 dimensions)
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Encode a customer profile into the classifier's feature layout.
///
/// Pure and deterministic: identical profiles yield bit-identical vectors.
/// Numeric attributes pass through unscaled. Every categorical value is
/// checked against its training-time domain before any block is written;
/// an out-of-domain value aborts the request with [`EncodeError`] rather
/// than vanishing into an all-zero block.
pub fn encode(profile: &CustomerProfile) -> Result<FeatureVector, EncodeError> {
    if profile.senior_citizen > 1 {
        return Err(EncodeError::InvalidAttributeValue {
            attribute: "SeniorCitizen",
            value: profile.senior_citizen.to_string(),
        });
    }

    let mut values = Vec::with_capacity(FEATURE_DIMENSION);
    values.push(f64::from(profile.senior_citizen));
    values.push(non_negative("MonthlyCharges", profile.monthly_charges)?);
    values.push(non_negative("TotalCharges", profile.total_charges)?);

    for (domain, value) in categorical_values(profile) {
        push_one_hot(&mut values, domain, value)?;
    }

    debug!("Encoded profile into {} features", values.len());
    debug_assert_eq!(values.len(), FEATURE_DIMENSION);

    Ok(FeatureVector { values })
}

/// Categorical attribute values in vector order
fn categorical_values(profile: &CustomerProfile) -> [(&'static Domain, &str); 16] {
    [
        (&domains::GENDER, profile.gender.as_str()),
        (&domains::PARTNER, profile.partner.as_str()),
        (&domains::DEPENDENTS, profile.dependents.as_str()),
        (&domains::PHONE_SERVICE, profile.phone_service.as_str()),
        (&domains::MULTIPLE_LINES, profile.multiple_lines.as_str()),
        (&domains::INTERNET_SERVICE, profile.internet_service.as_str()),
        (&domains::ONLINE_SECURITY, profile.online_security.as_str()),
        (&domains::ONLINE_BACKUP, profile.online_backup.as_str()),
        (&domains::DEVICE_PROTECTION, profile.device_protection.as_str()),
        (&domains::TECH_SUPPORT, profile.tech_support.as_str()),
        (&domains::STREAMING_TV, profile.streaming_tv.as_str()),
        (&domains::STREAMING_MOVIES, profile.streaming_movies.as_str()),
        (&domains::CONTRACT, profile.contract.as_str()),
        (&domains::PAPERLESS_BILLING, profile.paperless_billing.as_str()),
        (&domains::PAYMENT_METHOD, profile.payment_method.as_str()),
        (&domains::TENURE_GROUP, profile.tenure_group.as_str()),
    ]
}

fn non_negative(attribute: &'static str, value: f64) -> Result<f64, EncodeError> {
    if !value.is_finite() || value < 0.0 {
        return Err(EncodeError::InvalidAttributeValue {
            attribute,
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn push_one_hot(
    values: &mut Vec<f64>,
    domain: &Domain,
    value: &str,
) -> Result<(), EncodeError> {
    let hot = domain
        .index_of(value)
        .ok_or_else(|| EncodeError::InvalidAttributeValue {
            attribute: domain.attribute,
            value: value.to_string(),
        })?;
    for i in 0..domain.cardinality() {
        values.push(if i == hot { 1.0 } else { 0.0 });
    }
    Ok(())
}
