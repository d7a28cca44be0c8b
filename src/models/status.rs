use serde::{Deserialize, Serialize};

use crate::store::Row;

/// A pipeline stage. The relative order of non-deleted statuses in the
/// sheet defines the forward-progression order for candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub id: String,
    pub name: String,
    pub color: String,
    pub description: String,
    #[serde(rename = "isDeleted")]
    pub is_deleted: u8,
}

/// Status sheet column indexes (A..E).
pub mod col {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    pub const COLOR: usize = 2;
    pub const DESCRIPTION: usize = 3;
    pub const IS_DELETED: usize = 4;
    pub const WIDTH: usize = 5;
}

fn cell(row: &Row, idx: usize) -> String {
    row.get(idx).cloned().unwrap_or_default()
}

impl Status {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: cell(row, col::ID),
            name: cell(row, col::NAME),
            color: cell(row, col::COLOR),
            description: cell(row, col::DESCRIPTION),
            is_deleted: if cell(row, col::IS_DELETED) == "1" { 1 } else { 0 },
        }
    }

    pub fn to_row(&self) -> Row {
        vec![
            self.id.clone(),
            self.name.trim().to_string(),
            self.color.clone(),
            self.description.clone(),
            self.is_deleted.to_string(),
        ]
    }
}
