//! Status-progression policy: the ordered list of non-deleted statuses is
//! a total order, and candidates only move forward through it. Names the
//! order system does not recognize are allowed through — legacy and custom
//! statuses must not hard-block edits.

use crate::models::status::Status;
use crate::utils::validation::FieldResult;

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Index of a status name in the pipeline order, skipping deleted entries.
pub fn status_order(name: &str, statuses: &[Status]) -> Option<usize> {
    let target = normalize(name);
    statuses
        .iter()
        .position(|s| s.is_deleted == 0 && normalize(&s.name) == target)
}

pub fn validate_status_progression(
    old_status: &str,
    new_status: &str,
    statuses: &[Status],
) -> FieldResult {
    if normalize(old_status) == normalize(new_status) {
        return Ok(());
    }

    let (old_order, new_order) = match (
        status_order(old_status, statuses),
        status_order(new_status, statuses),
    ) {
        (Some(old), Some(new)) => (old, new),
        // Either side unknown to the order system: allow.
        _ => return Ok(()),
    };

    if new_order < old_order {
        return Err(format!(
            "Cannot move candidate backward from \"{}\" to \"{}\". Status progression must move forward only.",
            old_status, new_status
        ));
    }
    Ok(())
}
