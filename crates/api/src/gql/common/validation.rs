//! Contact and address checks shared by guest and group mutations.

use crate::error::DomainError;
use infra::repos::GroupDetails;

pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::validation(format!("'{email}' is not a valid email address"));

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

/// 7 to 15 digits, optionally punctuated with `+ - ( ) .` and spaces.
pub fn validate_phone(phone: &str) -> Result<(), DomainError> {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' ');
    let digits = phone.chars().filter(char::is_ascii_digit).count();

    if !phone.chars().all(allowed) || !(7..=15).contains(&digits) {
        return Err(DomainError::validation(format!(
            "'{phone}' is not a valid phone number"
        )));
    }
    Ok(())
}

fn is_us(country: Option<&str>) -> bool {
    match country.map(|c| c.trim().to_ascii_uppercase()) {
        None => true,
        Some(c) => matches!(
            c.as_str(),
            "" | "US" | "USA" | "UNITED STATES" | "UNITED STATES OF AMERICA"
        ),
    }
}

fn is_us_postal_code(code: &str) -> bool {
    let digits = |s: &str, n: usize| s.len() == n && s.chars().all(|c| c.is_ascii_digit());
    match code.split_once('-') {
        Some((zip, plus4)) => digits(zip, 5) && digits(plus4, 4),
        None => digits(code, 5),
    }
}

/// Validate a group's postal address and contact details. Expects text fields
/// already trimmed, with blanks as `None`.
pub fn validate_group_details(details: &GroupDetails) -> Result<(), DomainError> {
    if let Some(email) = details.email.as_deref() {
        validate_email(email)?;
    }
    if let Some(phone) = details.phone.as_deref() {
        validate_phone(phone)?;
    }

    let has_address = details.address_line1.is_some()
        || details.address_line2.is_some()
        || details.city.is_some()
        || details.state.is_some()
        || details.postal_code.is_some();
    if !has_address {
        return Ok(());
    }

    if details.address_line1.is_none() {
        return Err(DomainError::validation("Address line 1 is required"));
    }
    if details.city.is_none() {
        return Err(DomainError::validation("City is required"));
    }

    if is_us(details.country.as_deref()) {
        if let Some(state) = details.state.as_deref() {
            if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(DomainError::validation(format!(
                    "'{state}' is not a two-letter state code"
                )));
            }
        }
        if let Some(code) = details.postal_code.as_deref() {
            if !is_us_postal_code(code) {
                return Err(DomainError::validation(format!(
                    "'{code}' is not a valid ZIP code"
                )));
            }
        }
    }

    Ok(())
}
