use serde::{Deserialize, Serialize};

use crate::store::Row;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub name: String,
    pub description: String,
    pub department: String,
    /// Maximum hires for this position; `None` means unlimited.
    pub criteria: Option<u32>,
    #[serde(rename = "isDeleted")]
    pub is_deleted: u8,
}

/// Position sheet column indexes (A..F).
pub mod col {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    pub const DESCRIPTION: usize = 2;
    pub const DEPARTMENT: usize = 3;
    pub const CRITERIA: usize = 4;
    pub const IS_DELETED: usize = 5;
    pub const WIDTH: usize = 6;
}

fn cell(row: &Row, idx: usize) -> String {
    row.get(idx).cloned().unwrap_or_default()
}

impl Position {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: cell(row, col::ID),
            name: cell(row, col::NAME),
            description: cell(row, col::DESCRIPTION),
            department: cell(row, col::DEPARTMENT),
            criteria: cell(row, col::CRITERIA).parse().ok(),
            is_deleted: if cell(row, col::IS_DELETED) == "1" { 1 } else { 0 },
        }
    }

    pub fn to_row(&self) -> Row {
        vec![
            self.id.clone(),
            self.name.trim().to_string(),
            self.description.clone(),
            self.department.clone(),
            self.criteria.map(|c| c.to_string()).unwrap_or_default(),
            self.is_deleted.to_string(),
        ]
    }
}
