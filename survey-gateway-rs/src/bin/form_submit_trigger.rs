// survey-gateway-rs/src/bin/form_submit_trigger.rs
// Summarizes the newest survey row in place, meant to run after each form submission

use std::sync::Arc;

use sheet_store::{require_sheet, DirectoryWorkbook};
use summary_service::{LLMClient, Summarizer};
use survey_gateway::{init_tracing, run_form_submit_trigger, GatewayConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config_rs::load_dotenv();
    init_tracing();

    let config = GatewayConfig::from_env()?;
    let workbook = DirectoryWorkbook::open(&config.sheet_dir).await?;
    let sheet = require_sheet(&workbook, &config.handler.survey_sheet).await?;

    let summarizer = Summarizer::new(Arc::new(LLMClient::new(config.completion)?));

    match run_form_submit_trigger(sheet.as_ref(), &summarizer).await? {
        Some(outcome) if outcome.summarized => {
            tracing::info!("Row {} summarized", outcome.row);
        }
        Some(outcome) => {
            tracing::warn!("Row {} marked with: {}", outcome.row, outcome.cell_value);
        }
        None => tracing::info!("Nothing to summarize"),
    }

    Ok(())
}
