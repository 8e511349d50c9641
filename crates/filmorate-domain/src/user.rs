//! User field rules.

use chrono::NaiveDate;

use crate::validation::FieldError;

/// Accept `local@domain.tld` shaped addresses without whitespace.
pub fn validate_email(email: &str) -> Result<(), FieldError> {
    if email.chars().any(char::is_whitespace) {
        return Err(FieldError::Email);
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(FieldError::Email);
    };
    if local.is_empty() || domain.contains('@') {
        return Err(FieldError::Email);
    }
    let labels_ok = domain.split('.').all(|label| !label.is_empty());
    if !domain.contains('.') || !labels_ok {
        return Err(FieldError::Email);
    }
    Ok(())
}

/// Login must be non-blank and space-free.
pub fn validate_login(login: &str) -> Result<(), FieldError> {
    if login.is_empty() || login.chars().any(char::is_whitespace) {
        return Err(FieldError::Login);
    }
    Ok(())
}

/// A birthday of today is allowed; tomorrow is not.
pub fn validate_birthday(birthday: NaiveDate, today: NaiveDate) -> Result<(), FieldError> {
    if birthday > today {
        return Err(FieldError::Birthday);
    }
    Ok(())
}

/// Display name falls back to the login when missing or blank.
pub fn display_name(name: Option<&str>, login: &str) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => name.to_owned(),
        _ => login.to_owned(),
    }
}
