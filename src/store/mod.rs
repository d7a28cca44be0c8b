pub mod locks;
pub mod memory;
pub mod resume;

use async_trait::async_trait;

use crate::error::Result;

/// One record in a sheet: raw cell strings in fixed column order.
/// Cell 0 is always the record id.
pub type Row = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sheet {
    Candidates,
    Positions,
    Statuses,
}

impl Sheet {
    pub fn name(&self) -> &'static str {
        match self {
            Sheet::Candidates => "candidates",
            Sheet::Positions => "positions",
            Sheet::Statuses => "statuses",
        }
    }
}

/// The backing store contract. A spreadsheet-style row store: no
/// transactions, no version tokens, but a write followed by a read
/// reflects the write. Implementations surface an expired upstream
/// credential as `Error::AuthExpired` so the caller can distinguish it
/// from a generic outage.
#[async_trait]
pub trait RowStore: Send + Sync {
    async fn list(&self, sheet: Sheet) -> Result<Vec<Row>>;
    async fn append(&self, sheet: Sheet, row: Row) -> Result<()>;
    async fn update_row(&self, sheet: Sheet, id: &str, row: Row) -> Result<()>;
    async fn update_cell(&self, sheet: Sheet, id: &str, column: usize, value: String) -> Result<()>;
    async fn delete_row(&self, sheet: Sheet, id: &str) -> Result<()>;
}
