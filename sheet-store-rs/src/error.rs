use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Sheet already exists: {0}")]
    SheetExists(String),

    #[error("Row {row} is out of range (last row is {last})")]
    RowOutOfRange { row: usize, last: usize },

    #[error("Column {0} is out of range")]
    ColumnOutOfRange(usize),

    #[error("IO error on sheet storage: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupt row at {path}:{line}: {source}")]
    Corrupt {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
