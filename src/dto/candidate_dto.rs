use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Typed candidate form, extracted from the multipart request before any
/// core logic runs. Every value arrives as the raw form string; the domain
/// validators own parsing and bounds.
#[derive(Debug, Clone, Default)]
pub struct CandidateForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub position: String,
    pub status: String,
    pub status_flag: String,
    pub experience_years: String,
    pub experience_months: String,
    pub current_salary: String,
    pub expected_salary: String,
    pub notice_period: String,
    pub reference: String,
    pub comments: String,
    /// (file name, bytes) when the request carried a CV upload.
    pub cv_file: Option<(String, Bytes)>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CandidateFilters {
    pub position: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "statusFlag")]
    pub status_flag: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusPayload {
    #[validate(length(min = 1))]
    pub status: String,
}

/// Best-effort fields pulled out of an uploaded CV.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ExtractedCv {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
}
