// survey-gateway-rs/src/main.rs
// Survey API - HTTP entry point for the survey and contact forms
// Port 8080 by default (SURVEY_GATEWAY_SERVICE_PORT)

use std::sync::Arc;

use sheet_store::record::{CONTACT_HEADER, SURVEY_HEADER};
use sheet_store::DirectoryWorkbook;
use summary_service::{LLMClient, Summarizer};
use survey_gateway::{init_tracing, GatewayConfig, SurveyGateway};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config_rs::load_dotenv();
    init_tracing();

    let config = GatewayConfig::from_env()?;
    tracing::info!("Using Survey Gateway address: {}", config.bind_address);
    tracing::info!("Using sheet directory: {}", config.sheet_dir.display());
    tracing::info!("Using completion model: {}", config.completion.model);

    tokio::fs::create_dir_all(&config.sheet_dir).await?;
    let workbook = DirectoryWorkbook::open(&config.sheet_dir).await?;
    workbook.ensure_sheet(&config.handler.survey_sheet, &SURVEY_HEADER).await?;
    workbook.ensure_sheet(&config.handler.contact_sheet, &CONTACT_HEADER).await?;

    let client = LLMClient::new(config.completion.clone())?;
    let gateway = Arc::new(SurveyGateway::new(
        config.handler.clone(),
        Summarizer::new(Arc::new(client)),
        Arc::new(workbook),
    ));

    let app = gateway.create_router();
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    tracing::info!("Survey Gateway listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Survey Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
    tracing::info!("Shutdown signal received");
}
