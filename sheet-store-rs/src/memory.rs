use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{read_cell, write_cell, SheetStore, StoreError, StoreResult, Workbook};

/// Sheet held in memory, used by tests and local runs
#[derive(Debug, Default)]
pub struct MemorySheet {
    name: String,
    rows: RwLock<Vec<Vec<String>>>,
}

impl MemorySheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: RwLock::new(Vec::new()),
        }
    }

    pub fn with_header(name: impl Into<String>, header: &[&str]) -> Self {
        Self {
            name: name.into(),
            rows: RwLock::new(vec![header.iter().map(|h| h.to_string()).collect()]),
        }
    }

    /// Copy of every row, header included
    pub async fn rows(&self) -> Vec<Vec<String>> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl SheetStore for MemorySheet {
    fn name(&self) -> &str {
        &self.name
    }

    async fn append_row(&self, row: Vec<String>) -> StoreResult<usize> {
        let mut rows = self.rows.write().await;
        rows.push(row);
        Ok(rows.len())
    }

    async fn last_row(&self) -> StoreResult<usize> {
        Ok(self.rows.read().await.len())
    }

    async fn get_value(&self, row: usize, column: usize) -> StoreResult<String> {
        read_cell(&self.rows.read().await, row, column)
    }

    async fn set_value(&self, row: usize, column: usize, value: String) -> StoreResult<()> {
        write_cell(&mut self.rows.write().await, row, column, value)
    }
}

/// Workbook of in-memory sheets
#[derive(Default)]
pub struct MemoryWorkbook {
    sheets: RwLock<HashMap<String, Arc<MemorySheet>>>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sheet; fails if the name is taken
    pub async fn insert(&self, sheet: MemorySheet) -> StoreResult<Arc<MemorySheet>> {
        let mut sheets = self.sheets.write().await;
        if sheets.contains_key(sheet.name()) {
            return Err(StoreError::SheetExists(sheet.name().to_string()));
        }
        let sheet = Arc::new(sheet);
        sheets.insert(sheet.name().to_string(), sheet.clone());
        Ok(sheet)
    }
}

#[async_trait]
impl Workbook for MemoryWorkbook {
    async fn sheet_by_name(&self, name: &str) -> StoreResult<Option<Arc<dyn SheetStore>>> {
        Ok(self
            .sheets
            .read()
            .await
            .get(name)
            .map(|sheet| sheet.clone() as Arc<dyn SheetStore>))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::require_sheet;

    #[tokio::test]
    async fn test_append_and_read_back() {
        let sheet = MemorySheet::with_header("responses", &["ts", "name"]);
        assert_eq!(sheet.last_row().await.unwrap(), 1);

        let index = sheet
            .append_row(vec!["2024".to_string(), "山田".to_string()])
            .await
            .unwrap();
        assert_eq!(index, 2);
        assert_eq!(sheet.get_value(2, 2).await.unwrap(), "山田");

        sheet.set_value(2, 3, "追記".to_string()).await.unwrap();
        assert_eq!(sheet.rows().await[1], vec!["2024", "山田", "追記"]);
    }

    #[tokio::test]
    async fn test_workbook_lookup() {
        let workbook = MemoryWorkbook::new();
        workbook.insert(MemorySheet::new("a")).await.unwrap();
        assert!(matches!(
            workbook.insert(MemorySheet::new("a")).await,
            Err(StoreError::SheetExists(_))
        ));

        assert!(workbook.sheet_by_name("a").await.unwrap().is_some());
        let err = require_sheet(&workbook, "missing").await.err().unwrap();
        assert!(matches!(err, StoreError::SheetNotFound(name) if name == "missing"));
    }
}
