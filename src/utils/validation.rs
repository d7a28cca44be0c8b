//! Field-level validators for form input. Pure functions: each returns the
//! first failing rule's message, and callers short-circuit on it.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

pub type FieldResult = std::result::Result<(), String>;

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 255;
const PHONE_MIN_DIGITS: usize = 10;
const PHONE_MAX_DIGITS: usize = 15;
const SALARY_CEILING: f64 = 100_000_000.0;
const NOTICE_PERIOD_MAX: i64 = 365;
const EXPERIENCE_YEARS_MAX: i64 = 50;
const STATUS_NAME_MIN: usize = 2;
const STATUS_NAME_MAX: usize = 50;
const DEPARTMENT_MIN: usize = 2;
const DEPARTMENT_MAX: usize = 50;
const MAX_CRITERIA: u32 = 1000;

const LINKEDIN_DOMAINS: [&str; 4] = [
    "linkedin.com",
    "www.linkedin.com",
    "in.linkedin.com",
    "uk.linkedin.com",
];

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z\s\-'.]+$").expect("name regex"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"))
}

fn position_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9\s\-().&]+$").expect("position name regex"))
}

fn status_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9\s\-()&]+$").expect("status name regex"))
}

fn department_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z\s\-&]+$").expect("department regex"))
}

fn hex_color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("hex color regex"))
}

/// Strips separators and a single leading `+`, leaving what should be
/// bare digits.
pub fn normalize_phone(phone: &str) -> String {
    let stripped: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '(' && *c != ')')
        .collect();
    stripped.trim_start_matches('+').to_string()
}

pub fn validate_name(name: &str) -> FieldResult {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name is required".into());
    }
    if trimmed.len() < NAME_MIN {
        return Err(format!("Name must be at least {} characters long", NAME_MIN));
    }
    if trimmed.len() > NAME_MAX {
        return Err(format!("Name must not exceed {} characters", NAME_MAX));
    }
    if !name_regex().is_match(trimmed) {
        return Err("Name contains invalid characters".into());
    }
    Ok(())
}

pub fn validate_email(email: &str) -> FieldResult {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err("Email is required".into());
    }
    if !email_regex().is_match(trimmed) {
        return Err("Please enter a valid email address".into());
    }
    if email.len() > EMAIL_MAX {
        return Err(format!("Email must not exceed {} characters", EMAIL_MAX));
    }
    Ok(())
}

/// Phone is optional; when present it must be 10-15 digits once
/// separators and the leading `+` are stripped.
pub fn validate_phone(phone: &str) -> FieldResult {
    if phone.trim().is_empty() {
        return Ok(());
    }

    let normalized = normalize_phone(phone);
    if !normalized.chars().all(|c| c.is_ascii_digit()) {
        return Err("Phone number must contain only digits".into());
    }
    if normalized.len() < PHONE_MIN_DIGITS {
        return Err(format!(
            "Phone number must be at least {} digits",
            PHONE_MIN_DIGITS
        ));
    }
    if normalized.len() > PHONE_MAX_DIGITS {
        return Err(format!(
            "Phone number must not exceed {} digits",
            PHONE_MAX_DIGITS
        ));
    }
    Ok(())
}

pub fn validate_linkedin(linkedin: &str) -> FieldResult {
    let trimmed = linkedin.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    let url = Url::parse(trimmed)
        .map_err(|_| "Please enter a valid LinkedIn URL".to_string())?;

    let host = url.host_str().unwrap_or_default();
    if !LINKEDIN_DOMAINS.contains(&host) {
        return Err(
            "Please enter a valid LinkedIn URL (e.g., https://linkedin.com/in/username)".into(),
        );
    }
    if !url.path().contains("/in/") {
        return Err("LinkedIn URL must be a profile link (containing '/in/')".into());
    }
    Ok(())
}

pub fn validate_salary(salary: &str, field_name: &str) -> FieldResult {
    let trimmed = salary.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| format!("{} must be a positive number", field_name))?;
    if value < 0.0 {
        return Err(format!("{} must be a positive number", field_name));
    }
    if value > SALARY_CEILING {
        return Err(format!("{} seems unrealistic", field_name));
    }
    Ok(())
}

pub fn validate_notice_period(notice_period: &str) -> FieldResult {
    let trimmed = notice_period.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    let days: i64 = trimmed
        .parse()
        .map_err(|_| "Notice period must be a positive number".to_string())?;
    if days < 0 {
        return Err("Notice period must be a positive number".into());
    }
    if days > NOTICE_PERIOD_MAX {
        return Err(format!(
            "Notice period cannot exceed {} days",
            NOTICE_PERIOD_MAX
        ));
    }
    Ok(())
}

pub fn validate_experience(years: &str, months: &str) -> FieldResult {
    let years_num: i64 = if years.trim().is_empty() {
        0
    } else {
        years
            .trim()
            .parse()
            .map_err(|_| "Experience years must be a positive number".to_string())?
    };
    if years_num < 0 {
        return Err("Experience years must be a positive number".into());
    }
    if years_num > EXPERIENCE_YEARS_MAX {
        return Err(format!(
            "Experience years cannot exceed {}",
            EXPERIENCE_YEARS_MAX
        ));
    }

    let months_num: i64 = if months.trim().is_empty() {
        0
    } else {
        months
            .trim()
            .parse()
            .map_err(|_| "Experience months must be between 0 and 11".to_string())?
    };
    if !(0..=11).contains(&months_num) {
        return Err("Experience months must be between 0 and 11".into());
    }
    Ok(())
}

pub fn validate_position_name(name: &str) -> FieldResult {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Position name is required".into());
    }
    if trimmed.len() < NAME_MIN {
        return Err(format!(
            "Position name must be at least {} characters long",
            NAME_MIN
        ));
    }
    if trimmed.len() > NAME_MAX {
        return Err(format!(
            "Position name must not exceed {} characters",
            NAME_MAX
        ));
    }
    if !position_name_regex().is_match(trimmed) {
        return Err(
            "Position name can only contain letters, numbers, spaces, hyphens, parentheses, periods, and ampersands"
                .into(),
        );
    }
    Ok(())
}

/// Department is optional on edit; callers that require it check for
/// emptiness themselves.
pub fn validate_department(department: &str) -> FieldResult {
    let trimmed = department.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if trimmed.len() < DEPARTMENT_MIN {
        return Err(format!(
            "Department name must be at least {} characters long",
            DEPARTMENT_MIN
        ));
    }
    if trimmed.len() > DEPARTMENT_MAX {
        return Err(format!(
            "Department name must not exceed {} characters",
            DEPARTMENT_MAX
        ));
    }
    if !department_regex().is_match(trimmed) {
        return Err("Department name can only contain letters, spaces, hyphens, and ampersands".into());
    }
    Ok(())
}

pub fn validate_criteria(raw: &str) -> std::result::Result<Option<u32>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let criteria: i64 = trimmed
        .parse()
        .map_err(|_| "Vacancies must be a positive number".to_string())?;
    if criteria < 1 {
        return Err("Vacancies must be a positive number".into());
    }
    if criteria > MAX_CRITERIA as i64 {
        return Err(format!("Vacancies cannot exceed {}", MAX_CRITERIA));
    }
    Ok(Some(criteria as u32))
}

pub fn validate_status_name(name: &str) -> FieldResult {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Status name is required".into());
    }
    if trimmed.len() < STATUS_NAME_MIN {
        return Err(format!(
            "Status name must be at least {} characters long",
            STATUS_NAME_MIN
        ));
    }
    if trimmed.len() > STATUS_NAME_MAX {
        return Err(format!(
            "Status name must not exceed {} characters",
            STATUS_NAME_MAX
        ));
    }
    if !status_name_regex().is_match(trimmed) {
        return Err(
            "Status name can only contain letters, numbers, spaces, hyphens, parentheses, and ampersands"
                .into(),
        );
    }
    Ok(())
}

pub fn validate_hex_color(color: &str) -> FieldResult {
    let trimmed = color.trim();
    if trimmed.is_empty() {
        return Err("Status color is required".into());
    }
    if !hex_color_regex().is_match(trimmed) {
        return Err("Invalid color format. Please use a valid hex color (e.g., #00aaff)".into());
    }
    Ok(())
}
