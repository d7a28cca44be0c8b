use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Row;

/// Tri-state flag layered on top of the pipeline status. "Rejected"
/// freezes further status/position edits until the flag is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StatusFlag {
    #[default]
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "onHold")]
    OnHold,
    #[serde(rename = "rejected")]
    Rejected,
}

impl StatusFlag {
    /// Accepts both the textual form and the legacy numeric index the
    /// dashboard forms submit ("0" = active, "1" = onHold, "2" = rejected).
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "1" | "onhold" => StatusFlag::OnHold,
            "2" | "rejected" => StatusFlag::Rejected,
            _ => StatusFlag::Active,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFlag::Active => "active",
            StatusFlag::OnHold => "onHold",
            StatusFlag::Rejected => "rejected",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            StatusFlag::Active => 0,
            StatusFlag::OnHold => 1,
            StatusFlag::Rejected => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusHistoryEntry {
    #[serde(rename = "historyId")]
    pub history_id: String,
    #[serde(rename = "oldStatus")]
    pub old_status: String,
    #[serde(rename = "newStatus")]
    pub new_status: String,
    #[serde(rename = "changedAt")]
    pub changed_at: DateTime<Utc>,
    #[serde(rename = "changedBy")]
    pub changed_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub position: String,
    /// Years and months, kept as the raw form strings.
    pub experience: (String, String),
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub email: String,
    #[serde(rename = "currentSalary")]
    pub current_salary: String,
    #[serde(rename = "expectedSalary")]
    pub expected_salary: String,
    #[serde(rename = "noticePeriod")]
    pub notice_period: String,
    pub status: String,
    #[serde(rename = "statusFlag")]
    pub status_flag: StatusFlag,
    pub linkedin: String,
    pub reference: String,
    pub comments: String,
    #[serde(rename = "fileId")]
    pub file_id: String,
    #[serde(rename = "isDeleted")]
    pub is_deleted: u8,
    #[serde(rename = "entryDate")]
    pub entry_date: String,
    #[serde(rename = "statusHistory")]
    pub status_history: Vec<StatusHistoryEntry>,
}

/// Candidate sheet column indexes (A..R).
pub mod col {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    pub const POSITION: usize = 2;
    pub const EXPERIENCE: usize = 3;
    pub const PHONE: usize = 4;
    pub const EMAIL: usize = 5;
    pub const CURRENT_SALARY: usize = 6;
    pub const EXPECTED_SALARY: usize = 7;
    pub const NOTICE_PERIOD: usize = 8;
    pub const STATUS: usize = 9;
    pub const STATUS_FLAG: usize = 10;
    pub const LINKEDIN: usize = 11;
    pub const REFERENCE: usize = 12;
    pub const COMMENTS: usize = 13;
    pub const FILE_ID: usize = 14;
    pub const IS_DELETED: usize = 15;
    pub const ENTRY_DATE: usize = 16;
    pub const STATUS_HISTORY: usize = 17;
    pub const WIDTH: usize = 18;
}

fn cell(row: &Row, idx: usize) -> String {
    row.get(idx).cloned().unwrap_or_default()
}

impl Candidate {
    pub fn from_row(row: &Row) -> Self {
        let experience_raw = cell(row, col::EXPERIENCE);
        let mut parts = experience_raw.splitn(2, ',');
        let years = parts.next().unwrap_or("").to_string();
        let months = parts.next().unwrap_or("").to_string();

        let phone_raw = cell(row, col::PHONE);
        let phone_number = if phone_raw.is_empty() {
            String::new()
        } else {
            format!("+{}", phone_raw)
        };

        Self {
            id: cell(row, col::ID),
            name: cell(row, col::NAME),
            position: cell(row, col::POSITION),
            experience: (years, months),
            phone_number,
            email: cell(row, col::EMAIL),
            current_salary: cell(row, col::CURRENT_SALARY),
            expected_salary: cell(row, col::EXPECTED_SALARY),
            notice_period: cell(row, col::NOTICE_PERIOD),
            status: cell(row, col::STATUS),
            status_flag: StatusFlag::parse(&cell(row, col::STATUS_FLAG)),
            linkedin: cell(row, col::LINKEDIN),
            reference: cell(row, col::REFERENCE),
            comments: cell(row, col::COMMENTS),
            file_id: cell(row, col::FILE_ID),
            is_deleted: if cell(row, col::IS_DELETED) == "1" { 1 } else { 0 },
            entry_date: cell(row, col::ENTRY_DATE),
            status_history: deserialize_status_history(&cell(row, col::STATUS_HISTORY)),
        }
    }

    pub fn to_row(&self) -> Row {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.position.clone(),
            format!("{},{}", self.experience.0, self.experience.1),
            self.phone_number.trim_start_matches('+').to_string(),
            self.email.clone(),
            self.current_salary.clone(),
            self.expected_salary.clone(),
            self.notice_period.clone(),
            self.status.clone(),
            self.status_flag.as_str().to_string(),
            self.linkedin.clone(),
            self.reference.clone(),
            self.comments.clone(),
            self.file_id.clone(),
            self.is_deleted.to_string(),
            self.entry_date.clone(),
            serialize_status_history(&self.status_history),
        ]
    }
}

/// The history list rides in a single sheet cell as a JSON string; the
/// empty list serializes to "[]".
pub fn serialize_status_history(history: &[StatusHistoryEntry]) -> String {
    if history.is_empty() {
        return "[]".to_string();
    }
    serde_json::to_string(history).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to serialize status history");
        "[]".to_string()
    })
}

/// Tolerant of blank cells and garbage: anything that is not a JSON array
/// of entries comes back as an empty list with a logged warning.
pub fn deserialize_status_history(raw: &str) -> Vec<StatusHistoryEntry> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "[]" {
        return Vec::new();
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Array(_)) => {
            serde_json::from_str::<Vec<StatusHistoryEntry>>(trimmed).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "status history entries malformed");
                Vec::new()
            })
        }
        Ok(_) => {
            tracing::warn!("status history cell is not a JSON array");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(error = %e, "status history cell is not valid JSON");
            Vec::new()
        }
    }
}
