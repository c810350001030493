//! Gateway errors
//!
//! Every failure leaves the gateway as a `success: false` JSON body tagged
//! with its kind. Authentication failures carry a fixed generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use form_validation::ContactFormError;
use sheet_store::StoreError;
use summary_service::CompletionError;

use crate::response::ApiResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Authentication,
    Upstream,
    Persistence,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid JSON format")]
    InvalidJson,

    #[error("Invalid form data: {0}")]
    InvalidForm(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("認証エラー: 無効なトークンです")]
    Unauthorized,

    #[error("不明なアクションです: {0}")]
    UnknownAction(String),

    #[error("回答データがありません")]
    MissingAnswers,

    #[error("回答データの形式が不正です: {0}")]
    InvalidAnswers(String),

    #[error("保存するデータがありません")]
    MissingData,

    #[error("{}", .0.user_message())]
    Contact(#[from] ContactFormError),

    #[error("{}", .0.sentinel_message())]
    Completion(#[from] CompletionError),

    #[error("スプレッドシートの取得に失敗しました")]
    SheetUnavailable(String),

    #[error("データ保存でエラーが発生しました: {0}")]
    Store(StoreError),
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SheetNotFound(name) => GatewayError::SheetUnavailable(name),
            other => GatewayError::Store(other),
        }
    }
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::InvalidJson
            | GatewayError::InvalidForm(_)
            | GatewayError::PayloadTooLarge
            | GatewayError::UnknownAction(_)
            | GatewayError::MissingAnswers
            | GatewayError::InvalidAnswers(_)
            | GatewayError::MissingData
            | GatewayError::Contact(_) => ErrorKind::Validation,
            GatewayError::Unauthorized => ErrorKind::Authentication,
            GatewayError::Completion(_) => ErrorKind::Upstream,
            GatewayError::SheetUnavailable(_) | GatewayError::Store(_) => ErrorKind::Persistence,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        if let GatewayError::PayloadTooLarge = self {
            return StatusCode::PAYLOAD_TOO_LARGE;
        }
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Upstream => StatusCode::BAD_GATEWAY,
            ErrorKind::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map an extractor rejection; an over-limit body keeps its 413
    pub fn from_body_rejection(status: StatusCode, detail: String, fallback: fn(String) -> Self) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            GatewayError::PayloadTooLarge
        } else {
            fallback(detail)
        }
    }

    /// Convert to HTTP status code and error body
    pub fn to_response(&self) -> (StatusCode, Json<ApiResponse>) {
        (
            self.status_code(),
            Json(ApiResponse::failure(self.to_string(), self.kind())),
        )
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_and_status_codes() {
        assert_eq!(GatewayError::Unauthorized.kind(), ErrorKind::Authentication);
        assert_eq!(GatewayError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(GatewayError::MissingData.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            GatewayError::Completion(CompletionError::MalformedResponse).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_oversized_body_rejection() {
        let err = GatewayError::from_body_rejection(
            StatusCode::PAYLOAD_TOO_LARGE,
            "length limit exceeded".to_string(),
            GatewayError::InvalidForm,
        );
        assert!(matches!(err, GatewayError::PayloadTooLarge));
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = GatewayError::from_body_rejection(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Form requests must have `Content-Type: application/x-www-form-urlencoded`".to_string(),
            GatewayError::InvalidForm,
        );
        assert!(matches!(err, GatewayError::InvalidForm(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_sheet_maps_to_unavailable() {
        let err: GatewayError = StoreError::SheetNotFound("フォームの回答 1".to_string()).into();
        assert!(matches!(err, GatewayError::SheetUnavailable(_)));
        assert_eq!(err.to_string(), "スプレッドシートの取得に失敗しました");
        assert_eq!(err.kind(), ErrorKind::Persistence);

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: GatewayError = StoreError::Io(io).into();
        assert!(err.to_string().starts_with("データ保存でエラーが発生しました: "));
    }

    #[test]
    fn test_completion_error_keeps_sentinel_text() {
        let err = GatewayError::from(CompletionError::Upstream {
            status: 429,
            message: "Rate limit reached".to_string(),
        });
        assert_eq!(err.to_string(), "エラー: Rate limit reached");
        assert_eq!(err.kind(), ErrorKind::Upstream);
    }
}
