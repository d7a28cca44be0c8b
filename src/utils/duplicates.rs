//! Uniqueness checks over the live record sets. Re-run authoritatively on
//! every write path, not only in the form layer.

use crate::models::candidate::Candidate;
use crate::models::position::Position;
use crate::models::status::Status;
use crate::utils::validation::normalize_phone;

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn is_duplicate_email(email: &str, candidates: &[Candidate], exclude_id: Option<&str>) -> bool {
    if email.is_empty() {
        return false;
    }
    let target = normalize(email);
    candidates
        .iter()
        .any(|c| Some(c.id.as_str()) != exclude_id && normalize(&c.email) == target)
}

pub fn is_duplicate_linkedin(
    linkedin: &str,
    candidates: &[Candidate],
    exclude_id: Option<&str>,
) -> bool {
    if linkedin.is_empty() {
        return false;
    }
    let target = normalize(linkedin);
    candidates
        .iter()
        .any(|c| Some(c.id.as_str()) != exclude_id && normalize(&c.linkedin) == target)
}

/// Phone comparison only counts non-deleted candidates; trashed records
/// may keep their number without blocking re-entry.
pub fn is_duplicate_phone(phone: &str, candidates: &[Candidate], exclude_id: Option<&str>) -> bool {
    if phone.is_empty() {
        return false;
    }
    let target = normalize_phone(phone);
    candidates.iter().any(|c| {
        if Some(c.id.as_str()) == exclude_id || c.phone_number.is_empty() {
            return false;
        }
        normalize_phone(&c.phone_number) == target && c.is_deleted == 0
    })
}

pub fn is_duplicate_position_name(
    name: &str,
    positions: &[Position],
    exclude_id: Option<&str>,
) -> bool {
    let target = normalize(name);
    positions.iter().any(|p| {
        Some(p.id.as_str()) != exclude_id && normalize(&p.name) == target && p.is_deleted == 0
    })
}

pub fn is_duplicate_status_name(name: &str, statuses: &[Status], exclude_id: Option<&str>) -> bool {
    let target = normalize(name);
    statuses.iter().any(|s| {
        Some(s.id.as_str()) != exclude_id && normalize(&s.name) == target && s.is_deleted == 0
    })
}

pub fn is_duplicate_status_color(
    color: &str,
    statuses: &[Status],
    exclude_id: Option<&str>,
) -> bool {
    let target = normalize(color);
    statuses.iter().any(|s| {
        Some(s.id.as_str()) != exclude_id && normalize(&s.color) == target && s.is_deleted == 0
    })
}
