//! Append-only tabular storage
//!
//! A workbook holds named sheets; a sheet is a grid of string cells
//! addressed by 1-based row and column, the way spreadsheet triggers see it.
//! Rows are only ever appended. Single cells may be overwritten, which the
//! legacy summary trigger relies on.

mod error;
mod jsonl;
mod memory;
pub mod record;

use std::sync::Arc;

use async_trait::async_trait;

pub use error::{StoreError, StoreResult};
pub use jsonl::{DirectoryWorkbook, JsonlSheet};
pub use memory::{MemorySheet, MemoryWorkbook};
pub use record::{ContactRecord, SubmissionRecord};

#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Sheet name as shown in the workbook
    fn name(&self) -> &str;

    /// Append a row and return its 1-based index
    async fn append_row(&self, row: Vec<String>) -> StoreResult<usize>;

    /// Number of stored rows, header included; 0 for an empty sheet
    async fn last_row(&self) -> StoreResult<usize>;

    /// Read one cell; cells past the end of a row read as empty
    async fn get_value(&self, row: usize, column: usize) -> StoreResult<String>;

    /// Overwrite one cell of an existing row
    async fn set_value(&self, row: usize, column: usize, value: String) -> StoreResult<()>;
}

#[async_trait]
pub trait Workbook: Send + Sync {
    /// Look a sheet up by name, `None` if it does not exist
    async fn sheet_by_name(&self, name: &str) -> StoreResult<Option<Arc<dyn SheetStore>>>;
}

/// Look a sheet up, turning absence into `StoreError::SheetNotFound`
pub async fn require_sheet(workbook: &dyn Workbook, name: &str) -> StoreResult<Arc<dyn SheetStore>> {
    workbook
        .sheet_by_name(name)
        .await?
        .ok_or_else(|| StoreError::SheetNotFound(name.to_string()))
}

fn check_cell(rows: &[Vec<String>], row: usize, column: usize) -> StoreResult<()> {
    if column == 0 {
        return Err(StoreError::ColumnOutOfRange(column));
    }
    if row == 0 || row > rows.len() {
        return Err(StoreError::RowOutOfRange {
            row,
            last: rows.len(),
        });
    }
    Ok(())
}

pub(crate) fn read_cell(rows: &[Vec<String>], row: usize, column: usize) -> StoreResult<String> {
    check_cell(rows, row, column)?;
    Ok(rows[row - 1].get(column - 1).cloned().unwrap_or_default())
}

pub(crate) fn write_cell(rows: &mut [Vec<String>], row: usize, column: usize, value: String) -> StoreResult<()> {
    check_cell(rows, row, column)?;
    let cells = &mut rows[row - 1];
    if cells.len() < column {
        cells.resize(column, String::new());
    }
    cells[column - 1] = value;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_addressing() {
        let mut rows = vec![vec!["a".to_string(), "b".to_string()]];
        assert_eq!(read_cell(&rows, 1, 2).unwrap(), "b");
        assert_eq!(read_cell(&rows, 1, 9).unwrap(), "");
        assert!(matches!(
            read_cell(&rows, 2, 1),
            Err(StoreError::RowOutOfRange { row: 2, last: 1 })
        ));
        assert!(matches!(read_cell(&rows, 1, 0), Err(StoreError::ColumnOutOfRange(0))));

        write_cell(&mut rows, 1, 4, "d".to_string()).unwrap();
        assert_eq!(rows[0], vec!["a", "b", "", "d"]);
    }
}
