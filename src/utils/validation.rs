use crate::utils::error::{FareError, Result};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FareError::validation(
            field_name,
            format!("El campo {} es obligatorio", field_name),
        ));
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| {
        FareError::validation(field_name, format!("El campo {} es obligatorio", field_name))
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(FareError::validation(
            field_name,
            format!("{} debe estar entre {} y {}", field_name, min, max),
        ));
    }
    Ok(())
}

pub fn validate_email(field_name: &str, email: &str) -> Result<()> {
    validate_non_empty_string(field_name, email)?;
    if !EMAIL_PATTERN.is_match(email.trim()) {
        return Err(FareError::validation(
            field_name,
            "Ingrese un correo electrónico válido",
        ));
    }
    Ok(())
}

/// Accepts 8 to 15 digits once spaces, dashes, parentheses and a leading `+`
/// are removed, e.g. `+56 9 1234 5678`.
pub fn validate_phone(field_name: &str, phone: &str) -> Result<()> {
    validate_non_empty_string(field_name, phone)?;
    let trimmed = phone.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = body
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    if !digits.chars().all(|c| c.is_ascii_digit()) || !(8..=15).contains(&digits.len()) {
        return Err(FareError::validation(
            field_name,
            "Ingrese un número de teléfono válido",
        ));
    }
    Ok(())
}
