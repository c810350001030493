//! Shared-secret check for survey requests
//!
//! The token travels in the JSON body. A missing, non-string or mismatched
//! token fails the same way and the expected token never appears in logs or
//! responses.

use serde_json::Value;

use crate::error::GatewayError;

/// Accept only a string token equal to the configured one
pub fn authenticate(expected: &str, presented: Option<&Value>) -> Result<(), GatewayError> {
    // an empty configured token would match an empty presented one
    if expected.is_empty() {
        tracing::error!("Auth token is not configured; rejecting request");
        return Err(GatewayError::Unauthorized);
    }

    match presented.and_then(Value::as_str) {
        Some(token) if token == expected => Ok(()),
        Some(_) => {
            tracing::warn!("Rejected request with mismatched token");
            Err(GatewayError::Unauthorized)
        }
        None => {
            tracing::warn!("Rejected request without token");
            Err(GatewayError::Unauthorized)
        }
    }
}
