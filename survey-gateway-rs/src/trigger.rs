//! Spreadsheet-side summary trigger
//!
//! Runs after a form response lands in the survey sheet: reads the first
//! seven answers of the newest row, summarizes them and writes the result
//! into the summary column of that row. A failed summary is written as its
//! `エラー: ` message so the sheet shows what went wrong.

use sheet_store::record::{FIRST_ANSWER_COLUMN, HEADER_ROWS, SUMMARY_COLUMN};
use sheet_store::{SheetStore, StoreResult};
use summary_service::{Summarizer, SUMMARY_ANSWER_COUNT};

/// What the trigger wrote, and where
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerOutcome {
    pub row: usize,
    pub cell_value: String,
    pub summarized: bool,
}

/// Summarize the newest row; `None` when the sheet holds no responses
pub async fn run_form_submit_trigger(
    sheet: &dyn SheetStore,
    summarizer: &Summarizer,
) -> StoreResult<Option<TriggerOutcome>> {
    let row = sheet.last_row().await?;
    if row <= HEADER_ROWS {
        tracing::info!("Sheet '{}' has no responses yet", sheet.name());
        return Ok(None);
    }

    let mut cells = Vec::with_capacity(SUMMARY_ANSWER_COUNT);
    for offset in 0..SUMMARY_ANSWER_COUNT {
        cells.push(sheet.get_value(row, FIRST_ANSWER_COLUMN + offset).await?);
    }
    let answers: [&str; SUMMARY_ANSWER_COUNT] = std::array::from_fn(|i| cells[i].as_str());

    let (cell_value, summarized) = match summarizer.summarize_raw(answers).await {
        Ok(summary) => (summary, true),
        Err(err) => {
            tracing::error!("Summary failed for row {}: {}", row, err);
            (err.sentinel_message(), false)
        }
    };

    sheet.set_value(row, SUMMARY_COLUMN, cell_value.clone()).await?;
    tracing::info!("Wrote summary to row {} of '{}'", row, sheet.name());

    Ok(Some(TriggerOutcome {
        row,
        cell_value,
        summarized,
    }))
}
