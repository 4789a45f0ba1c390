use std::sync::OnceLock;

use regex::Regex;

const PHONE_SEPARATORS: &[char] = &[' ', '-', '(', ')', '+'];

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    })
}

/// Name must be present and 2-100 characters after trimming.
pub fn validate_name(name: Option<&str>) -> Option<&'static str> {
    let name = name.unwrap_or("");
    if name.trim().is_empty() {
        return Some("Name is required");
    }
    let len = name.trim().chars().count();
    if !(2..=100).contains(&len) {
        return Some("Name must be between 2 and 100 characters");
    }
    None
}

/// Email must look like `local@domain.tld` and the raw value may not exceed
/// 255 characters.
pub fn validate_email(email: Option<&str>) -> Option<&'static str> {
    let email = email.unwrap_or("");
    if email.trim().is_empty() {
        return Some("Email is required");
    }
    if !email_regex().is_match(email) {
        return Some("Invalid email format");
    }
    if email.chars().count() > 255 {
        return Some("Email is too long");
    }
    None
}

/// Phone must reduce to 8-15 digits once common separators are stripped.
pub fn validate_phone(phone: Option<&str>) -> Option<&'static str> {
    let phone = phone.unwrap_or("");
    if phone.trim().is_empty() {
        return Some("Phone number is required");
    }
    let cleaned: String = phone
        .chars()
        .filter(|c| !PHONE_SEPARATORS.contains(c))
        .collect();
    if !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Some("Phone number must contain only numbers");
    }
    if !(8..=15).contains(&cleaned.len()) {
        return Some("Phone number must be between 8 and 15 digits");
    }
    None
}
