use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// Body of every POST response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl ApiResponse {
    pub fn summary(summary: impl Into<String>) -> Self {
        Self {
            success: true,
            summary: Some(summary.into()),
            message: None,
            error: None,
            kind: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            summary: None,
            message: Some(message.into()),
            error: None,
            kind: None,
        }
    }

    pub fn failure(error: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            success: false,
            summary: None,
            message: None,
            error: Some(error.into()),
            kind: Some(kind),
        }
    }
}

/// Body of the GET status check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn running() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Survey API is running".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
