//! HTTP front of the customer survey
//!
//! `POST /` carries `{token, action, ...}` JSON and either summarizes a set
//! of answers or appends a submission to the survey sheet. `POST /contact`
//! takes the urlencoded contact form. `GET /` and `GET /health` report
//! liveness.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, FormRejection},
        State,
    },
    http::{header::CONTENT_TYPE, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use form_validation::{ContactForm, SUBMIT_SUCCESS_MESSAGE as CONTACT_SUCCESS_MESSAGE};
use sheet_store::{require_sheet, ContactRecord, Workbook};
use summary_service::{Summarizer, SummaryAnswers};

pub mod action;
pub mod auth;
pub mod config;
pub mod error;
pub mod response;
pub mod submission;
pub mod trigger;

pub use action::Action;
pub use config::{GatewayConfig, HandlerConfig};
pub use error::{ErrorKind, GatewayError};
pub use response::{ApiResponse, HealthResponse};
pub use trigger::{run_form_submit_trigger, TriggerOutcome};

pub const MAX_PAYLOAD_SIZE: usize = 1024 * 1024;

pub const SUBMIT_SUCCESS_MESSAGE: &str = "アンケートを送信しました。ご協力ありがとうございました！";

/// Survey request body (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct SurveyRequest {
    pub token: Option<Value>,
    pub action: Option<Value>,
    pub answers: Option<Value>,
    pub data: Option<Value>,
}

/// Install the `tracing` subscriber, `RUST_LOG` wins over the default level
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Survey gateway state and handlers
pub struct SurveyGateway {
    config: HandlerConfig,
    summarizer: Summarizer,
    workbook: Arc<dyn Workbook>,
}

impl SurveyGateway {
    pub fn new(config: HandlerConfig, summarizer: Summarizer, workbook: Arc<dyn Workbook>) -> Self {
        Self {
            config,
            summarizer,
            workbook,
        }
    }

    /// Create the Axum router with all routes and middleware
    pub fn create_router(self: Arc<Self>) -> Router {
        Router::new()
            .route("/", get(Self::health_handler).post(Self::survey_handler))
            .route("/health", get(Self::health_handler))
            .route("/contact", post(Self::contact_handler))
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(MAX_PAYLOAD_SIZE))
            .layer(middleware::map_response(Self::payload_limit_as_json))
            .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
            .with_state(self)
    }

    /// The limit layer answers a declared oversized body before any handler runs
    async fn payload_limit_as_json(response: Response) -> Response {
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .is_some_and(|value| value.as_bytes().starts_with(b"application/json"));
        if response.status() == StatusCode::PAYLOAD_TOO_LARGE && !is_json {
            tracing::warn!("Rejected request body over {} bytes", MAX_PAYLOAD_SIZE);
            return GatewayError::PayloadTooLarge.into_response();
        }
        response
    }

    async fn health_handler() -> impl IntoResponse {
        Json(HealthResponse::running())
    }

    /// Body is parsed from raw bytes so a wrong content type still gets the JSON error
    async fn survey_handler(State(state): State<Arc<Self>>, body: Result<Bytes, BytesRejection>) -> Response {
        let body = match body {
            Ok(body) => body,
            Err(rejection) => {
                tracing::warn!("Unreadable survey request body: {}", rejection.body_text());
                let err = GatewayError::from_body_rejection(rejection.status(), rejection.body_text(), |_| {
                    GatewayError::InvalidJson
                });
                return err.into_response();
            }
        };

        let request: SurveyRequest = match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!("Unparsable survey request: {}", err);
                return GatewayError::InvalidJson.into_response();
            }
        };

        match state.handle(request).await {
            Ok(response) => (StatusCode::OK, Json(response)).into_response(),
            Err(err) => {
                tracing::warn!("Survey request failed ({:?}): {}", err.kind(), err);
                err.into_response()
            }
        }
    }

    /// Authenticate, then dispatch on the action
    pub async fn handle(&self, request: SurveyRequest) -> Result<ApiResponse, GatewayError> {
        auth::authenticate(&self.config.auth_token, request.token.as_ref())?;

        let action = Action::parse(request.action.as_ref())?;
        tracing::info!("Handling '{}' request", action);

        match action {
            Action::Summarize => self.summarize(request.answers).await,
            Action::Submit => self.submit(request.data.as_ref()).await,
        }
    }

    async fn summarize(&self, answers: Option<Value>) -> Result<ApiResponse, GatewayError> {
        let answers = match answers {
            None | Some(Value::Null) => return Err(GatewayError::MissingAnswers),
            Some(answers) => answers,
        };
        let answers = SummaryAnswers::from_json(&answers)
            .ok_or_else(|| GatewayError::InvalidAnswers("expected an object".to_string()))?;
        if !answers.has_any_answer() {
            tracing::debug!("Summarizing a survey with every answer blank");
        }

        let summary = self.summarizer.summarize_answers(&answers).await?;
        Ok(ApiResponse::summary(summary))
    }

    async fn submit(&self, data: Option<&Value>) -> Result<ApiResponse, GatewayError> {
        let record = submission::record_from_data(data, Utc::now())?;

        let sheet = require_sheet(self.workbook.as_ref(), &self.config.survey_sheet).await?;
        let row = sheet.append_row(record.to_row()).await?;
        tracing::info!("Stored survey response in row {} of '{}'", row, sheet.name());

        Ok(ApiResponse::message(SUBMIT_SUCCESS_MESSAGE))
    }

    async fn contact_handler(
        State(state): State<Arc<Self>>,
        form: Result<Form<HashMap<String, String>>, FormRejection>,
    ) -> Response {
        let result = match form {
            Ok(Form(fields)) => state.submit_contact(ContactForm::from_fields(&fields)).await,
            Err(rejection) => Err(GatewayError::from_body_rejection(
                rejection.status(),
                rejection.body_text(),
                GatewayError::InvalidForm,
            )),
        };

        match result {
            Ok(response) => (StatusCode::OK, Json(response)).into_response(),
            Err(err) => {
                tracing::warn!("Contact form rejected ({:?}): {}", err.kind(), err);
                err.into_response()
            }
        }
    }

    /// Validate a contact form and append it to the contact sheet
    pub async fn submit_contact(&self, form: ContactForm) -> Result<ApiResponse, GatewayError> {
        form.validate()?;

        let record = ContactRecord {
            timestamp: Utc::now(),
            name: form.name,
            email: form.email,
            company: form.company,
            message: form.message,
        };
        let sheet = require_sheet(self.workbook.as_ref(), &self.config.contact_sheet).await?;
        let row = sheet.append_row(record.to_row()).await?;
        tracing::info!("Stored contact inquiry in row {} of '{}'", row, sheet.name());

        Ok(ApiResponse::message(CONTACT_SUCCESS_MESSAGE))
    }
}
