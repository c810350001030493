use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use config_rs::ConfigError;
use summary_service::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use summary_service::CompletionConfig;

/// Prefix of `SURVEY_GATEWAY_SERVICE_PORT` and `SURVEY_GATEWAY_SERVICE_ADDR`
pub const SERVICE_NAME: &str = "survey_gateway";
pub const DEFAULT_PORT: u16 = 8080;

pub const DEFAULT_SURVEY_SHEET: &str = "フォームの回答 1";
pub const DEFAULT_CONTACT_SHEET: &str = "お問い合わせ";
pub const DEFAULT_SHEET_DIR: &str = "./data";

/// Settings the request handlers need
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerConfig {
    pub auth_token: String,
    pub survey_sheet: String,
    pub contact_sheet: String,
}

impl HandlerConfig {
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            survey_sheet: DEFAULT_SURVEY_SHEET.to_string(),
            contact_sheet: DEFAULT_CONTACT_SHEET.to_string(),
        }
    }
}

/// Everything the gateway binaries read from the environment
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_address: SocketAddr,
    pub sheet_dir: PathBuf,
    pub handler: HandlerConfig,
    pub completion: CompletionConfig,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_address = config_rs::get_bind_address(SERVICE_NAME, DEFAULT_PORT);

        let handler = HandlerConfig {
            auth_token: config_rs::get_required_secret("SURVEY_AUTH_TOKEN")?,
            survey_sheet: config_rs::get_env_or("SURVEY_SHEET_NAME", DEFAULT_SURVEY_SHEET),
            contact_sheet: config_rs::get_env_or("CONTACT_SHEET_NAME", DEFAULT_CONTACT_SHEET),
        };

        let timeout_secs: u64 = config_rs::get_parsed_or("LLM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let completion = CompletionConfig::new(config_rs::get_required_secret("OPENAI_API_KEY")?)
            .with_api_url(config_rs::get_env_or("LLM_API_URL", DEFAULT_API_URL))
            .with_model(config_rs::get_env_or("LLM_MODEL", DEFAULT_MODEL))
            .with_timeout(Duration::from_secs(timeout_secs));

        Ok(Self {
            bind_address,
            sheet_dir: PathBuf::from(config_rs::get_env_or("SURVEY_SHEET_DIR", DEFAULT_SHEET_DIR)),
            handler,
            completion,
        })
    }
}
