use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::store::{Row, RowStore, Sheet};

/// In-process row store. Rows live in per-sheet vectors behind one async
/// mutex, which gives the same coherence the real backing API provides:
/// each call is atomic, sequences of calls are not.
#[derive(Default)]
pub struct MemoryStore {
    sheets: Mutex<HashMap<Sheet, Vec<Row>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RowStore for MemoryStore {
    async fn list(&self, sheet: Sheet) -> Result<Vec<Row>> {
        let sheets = self.sheets.lock().await;
        Ok(sheets.get(&sheet).cloned().unwrap_or_default())
    }

    async fn append(&self, sheet: Sheet, row: Row) -> Result<()> {
        let mut sheets = self.sheets.lock().await;
        sheets.entry(sheet).or_default().push(row);
        Ok(())
    }

    async fn update_row(&self, sheet: Sheet, id: &str, row: Row) -> Result<()> {
        let mut sheets = self.sheets.lock().await;
        let rows = sheets.entry(sheet).or_default();
        match rows.iter_mut().find(|r| r.first().map(String::as_str) == Some(id)) {
            Some(existing) => {
                *existing = row;
                Ok(())
            }
            None => Err(Error::NotFound(format!(
                "Row {} not found in {}",
                id,
                sheet.name()
            ))),
        }
    }

    async fn update_cell(&self, sheet: Sheet, id: &str, column: usize, value: String) -> Result<()> {
        let mut sheets = self.sheets.lock().await;
        let rows = sheets.entry(sheet).or_default();
        match rows.iter_mut().find(|r| r.first().map(String::as_str) == Some(id)) {
            Some(existing) => {
                if existing.len() <= column {
                    existing.resize(column + 1, String::new());
                }
                existing[column] = value;
                Ok(())
            }
            None => Err(Error::NotFound(format!(
                "Row {} not found in {}",
                id,
                sheet.name()
            ))),
        }
    }

    async fn delete_row(&self, sheet: Sheet, id: &str) -> Result<()> {
        let mut sheets = self.sheets.lock().await;
        let rows = sheets.entry(sheet).or_default();
        let before = rows.len();
        rows.retain(|r| r.first().map(String::as_str) != Some(id));
        if rows.len() == before {
            return Err(Error::NotFound(format!(
                "Row {} not found in {}",
                id,
                sheet.name()
            )));
        }
        Ok(())
    }
}
