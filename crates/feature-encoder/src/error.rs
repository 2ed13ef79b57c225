//! Encoding Error Types

use thiserror::Error;

/// Errors during profile encoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Attribute value outside its declared domain
    #[error("{attribute} value {value:?} is not an admissible value")]
    InvalidAttributeValue {
        attribute: &'static str,
        value: String,
    },
}
