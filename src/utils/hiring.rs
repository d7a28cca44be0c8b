//! Hiring-limit policy: a position with a defined `criteria` caps how many
//! non-deleted candidates may hold the "Hired" status against it.

use crate::models::candidate::Candidate;

pub const HIRED_STATUS: &str = "hired";

pub fn is_hired_status(status: &str) -> bool {
    status.trim().to_lowercase() == HIRED_STATUS
}

pub fn hired_count_for_position(position_name: &str, candidates: &[Candidate]) -> usize {
    candidates
        .iter()
        .filter(|c| c.position == position_name && is_hired_status(&c.status) && c.is_deleted == 0)
        .count()
}

/// `None` criteria means unlimited hiring.
pub fn is_hiring_limit_reached(
    position_name: &str,
    criteria: Option<u32>,
    candidates: &[Candidate],
) -> bool {
    match criteria {
        Some(limit) => hired_count_for_position(position_name, candidates) >= limit as usize,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::StatusFlag;

    fn hired(id: &str, position: &str, status: &str, deleted: u8) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: "Someone".to_string(),
            position: position.to_string(),
            experience: ("1".to_string(), "0".to_string()),
            phone_number: String::new(),
            email: format!("{}@example.com", id),
            current_salary: String::new(),
            expected_salary: String::new(),
            notice_period: String::new(),
            status: status.to_string(),
            status_flag: StatusFlag::Active,
            linkedin: String::new(),
            reference: String::new(),
            comments: String::new(),
            file_id: String::new(),
            is_deleted: deleted,
            entry_date: String::new(),
            status_history: Vec::new(),
        }
    }

    #[test]
    fn counts_only_live_hired_candidates_of_the_position() {
        let list = vec![
            hired("c1", "Engineer", "Hired", 0),
            hired("c2", "Engineer", "hired", 0),
            hired("c3", "Engineer", "Hired", 1),
            hired("c4", "Designer", "Hired", 0),
            hired("c5", "Engineer", "Offered", 0),
        ];
        assert_eq!(hired_count_for_position("Engineer", &list), 2);
    }

    #[test]
    fn no_criteria_means_unlimited() {
        let list = vec![hired("c1", "Engineer", "Hired", 0)];
        assert!(!is_hiring_limit_reached("Engineer", None, &list));
    }

    #[test]
    fn limit_reached_at_exact_count() {
        let list = vec![
            hired("c1", "Engineer", "Hired", 0),
            hired("c2", "Engineer", "Hired", 0),
        ];
        assert!(is_hiring_limit_reached("Engineer", Some(2), &list));
        assert!(!is_hiring_limit_reached("Engineer", Some(3), &list));
    }
}
