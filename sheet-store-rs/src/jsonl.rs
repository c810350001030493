//! File-backed sheets
//!
//! Each sheet is a `<name>.jsonl` file in the workbook directory, one JSON
//! array of strings per row. Appends go to the end of the file; cell updates
//! rewrite the file through a temporary copy and an atomic rename.
//!
//! The gateway and the trigger binary share these files, so every access
//! holds an advisory lock on `<name>.jsonl.lock`: shared for reads,
//! exclusive for appends and rewrites. The lock lives in its own file because
//! a rewrite replaces the sheet file itself.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use fs2::FileExt;
use log::{debug, info};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::{read_cell, write_cell, SheetStore, StoreError, StoreResult, Workbook};

const SHEET_EXTENSION: &str = "jsonl";
const LOCK_EXTENSION: &str = "jsonl.lock";

/// Advisory lock held until dropped
struct SheetLock {
    file: std::fs::File,
}

impl SheetLock {
    async fn acquire(path: PathBuf, exclusive: bool) -> StoreResult<Self> {
        let file = tokio::task::spawn_blocking(move || -> std::io::Result<std::fs::File> {
            let file = std::fs::OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(&path)?;
            if exclusive {
                FileExt::lock_exclusive(&file)?;
            } else {
                FileExt::lock_shared(&file)?;
            }
            Ok(file)
        })
        .await
        .map_err(|e| StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))??;
        Ok(Self { file })
    }
}

impl Drop for SheetLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            log::warn!("Failed to release sheet lock: {}", e);
        }
    }
}

pub struct JsonlSheet {
    name: String,
    path: PathBuf,
    lock_path: PathBuf,
    // serializes writers within this process before they queue on the file lock
    write_lock: Mutex<()>,
}

impl JsonlSheet {
    fn new(name: &str, path: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            lock_path: path.with_extension(LOCK_EXTENSION),
            path,
            write_lock: Mutex::new(()),
        }
    }

    async fn lock(&self, exclusive: bool) -> StoreResult<SheetLock> {
        SheetLock::acquire(self.lock_path.clone(), exclusive).await
    }

    /// Caller must hold the sheet lock
    async fn read_rows(&self) -> StoreResult<Vec<Vec<String>>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::SheetNotFound(self.name.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str::<Vec<String>>(line).map_err(|source| StoreError::Corrupt {
                    path: self.path.clone(),
                    line: index + 1,
                    source,
                })
            })
            .collect()
    }

    async fn read_rows_shared(&self) -> StoreResult<Vec<Vec<String>>> {
        let _lock = self.lock(false).await?;
        self.read_rows().await
    }

    /// Caller must hold the exclusive sheet lock
    async fn write_rows(&self, rows: &[Vec<String>]) -> StoreResult<()> {
        let mut buffer = String::new();
        for row in rows {
            buffer.push_str(&encode_row(row)?);
        }

        let temp_path = self
            .path
            .with_extension(format!("{}.{}.tmp", SHEET_EXTENSION, std::process::id()));
        fs::write(&temp_path, buffer).await?;
        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

fn encode_row(row: &[String]) -> StoreResult<String> {
    let mut line = serde_json::to_string(row).map_err(|e| StoreError::Io(e.into()))?;
    line.push('\n');
    Ok(line)
}

#[async_trait]
impl SheetStore for JsonlSheet {
    fn name(&self) -> &str {
        &self.name
    }

    async fn append_row(&self, row: Vec<String>) -> StoreResult<usize> {
        let _guard = self.write_lock.lock().await;
        let _lock = self.lock(true).await?;
        let existing = self.read_rows().await?.len();

        let mut file = OpenOptions::new().append(true).open(&self.path).await?;
        file.write_all(encode_row(&row)?.as_bytes()).await?;
        file.flush().await?;

        debug!("Appended row {} to sheet '{}'", existing + 1, self.name);
        Ok(existing + 1)
    }

    async fn last_row(&self) -> StoreResult<usize> {
        Ok(self.read_rows_shared().await?.len())
    }

    async fn get_value(&self, row: usize, column: usize) -> StoreResult<String> {
        read_cell(&self.read_rows_shared().await?, row, column)
    }

    async fn set_value(&self, row: usize, column: usize, value: String) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let _lock = self.lock(true).await?;
        let mut rows = self.read_rows().await?;
        write_cell(&mut rows, row, column, value)?;
        self.write_rows(&rows).await
    }
}

/// Workbook backed by a directory of sheet files
pub struct DirectoryWorkbook {
    root: PathBuf,
    // handles are shared so every caller goes through the same write lock
    open_sheets: Mutex<std::collections::HashMap<String, Arc<JsonlSheet>>>,
}

impl DirectoryWorkbook {
    /// Open an existing directory; fails if it is missing
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        let metadata = fs::metadata(&root).await?;
        if !metadata.is_dir() {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a directory", root.display()),
            )));
        }
        info!("Opened sheet workbook at {}", root.display());
        Ok(Self {
            root,
            open_sheets: Mutex::new(std::collections::HashMap::new()),
        })
    }

    fn sheet_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, SHEET_EXTENSION))
    }

    /// Create a sheet with a header row unless it already exists
    pub async fn ensure_sheet(&self, name: &str, header: &[&str]) -> StoreResult<Arc<JsonlSheet>> {
        let path = self.sheet_path(name);
        let sheet = self.handle(name, path.clone()).await?;

        let _lock = sheet.lock(true).await?;
        if fs::metadata(&path).await.is_err() {
            let header: Vec<String> = header.iter().map(|h| h.to_string()).collect();
            fs::write(&path, encode_row(&header)?).await?;
            info!("Created sheet '{}' at {}", name, path.display());
        }
        Ok(sheet)
    }

    async fn handle(&self, name: &str, path: PathBuf) -> StoreResult<Arc<JsonlSheet>> {
        let mut open = self.open_sheets.lock().await;
        let sheet = open
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(JsonlSheet::new(name, path)))
            .clone();
        Ok(sheet)
    }
}

#[async_trait]
impl Workbook for DirectoryWorkbook {
    async fn sheet_by_name(&self, name: &str) -> StoreResult<Option<Arc<dyn SheetStore>>> {
        let path = self.sheet_path(name);
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {
                let sheet = self.handle(name, path).await?;
                Ok(Some(sheet as Arc<dyn SheetStore>))
            }
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SURVEY_HEADER;

    #[tokio::test]
    async fn test_sheet_lifecycle_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let workbook = DirectoryWorkbook::open(dir.path()).await.unwrap();

        assert!(workbook.sheet_by_name("responses").await.unwrap().is_none());

        workbook.ensure_sheet("responses", &SURVEY_HEADER).await.unwrap();
        let sheet = workbook.sheet_by_name("responses").await.unwrap().unwrap();
        assert_eq!(sheet.last_row().await.unwrap(), 1);

        let row: Vec<String> = (1..=15).map(|i| format!("c{}", i)).collect();
        assert_eq!(sheet.append_row(row).await.unwrap(), 2);
        assert_eq!(sheet.get_value(2, 15).await.unwrap(), "c15");

        sheet.set_value(2, 15, "要約".to_string()).await.unwrap();
        assert_eq!(sheet.get_value(2, 15).await.unwrap(), "要約");
        assert_eq!(sheet.get_value(2, 1).await.unwrap(), "c1");
        assert_eq!(sheet.last_row().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ensure_sheet_keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let workbook = DirectoryWorkbook::open(dir.path()).await.unwrap();

        let sheet = workbook.ensure_sheet("contact", &["a", "b"]).await.unwrap();
        sheet.append_row(vec!["1".to_string(), "2".to_string()]).await.unwrap();

        let again = workbook.ensure_sheet("contact", &["a", "b"]).await.unwrap();
        assert_eq!(again.last_row().await.unwrap(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_separate_handles_do_not_lose_appends() {
        let dir = tempfile::tempdir().unwrap();
        let server = DirectoryWorkbook::open(dir.path()).await.unwrap();
        let trigger = DirectoryWorkbook::open(dir.path()).await.unwrap();

        let appender = server.ensure_sheet("responses", &["h1", "h2"]).await.unwrap();
        appender
            .append_row(vec!["first".to_string(), String::new()])
            .await
            .unwrap();
        let rewriter = trigger.sheet_by_name("responses").await.unwrap().unwrap();

        let appends = tokio::spawn(async move {
            for i in 0..150 {
                appender
                    .append_row(vec![format!("row{}", i), String::new()])
                    .await
                    .unwrap();
            }
        });
        let rewrites = tokio::spawn(async move {
            for i in 0..150 {
                rewriter.set_value(2, 2, format!("summary{}", i)).await.unwrap();
            }
        });
        appends.await.unwrap();
        rewrites.await.unwrap();

        let sheet = server.sheet_by_name("responses").await.unwrap().unwrap();
        assert_eq!(sheet.last_row().await.unwrap(), 1 + 1 + 150);
        assert_eq!(sheet.get_value(2, 2).await.unwrap(), "summary149");
        assert_eq!(sheet.get_value(152, 1).await.unwrap(), "row149");

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_open_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(DirectoryWorkbook::open(&missing).await.is_err());
    }

    #[tokio::test]
    async fn test_corrupt_row_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.jsonl"), "[\"ok\"]\nnot json\n").unwrap();
        let workbook = DirectoryWorkbook::open(dir.path()).await.unwrap();
        let sheet = workbook.sheet_by_name("bad").await.unwrap().unwrap();

        match sheet.last_row().await {
            Err(StoreError::Corrupt { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected corrupt row error, got {:?}", other.map(|_| ())),
        }
    }
}
