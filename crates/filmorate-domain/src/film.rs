//! Film field rules.

use chrono::NaiveDate;

use crate::validation::FieldError;

/// Maximum description length in characters (not bytes).
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// The first public film screening; nothing may be released before it.
pub fn earliest_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1895, 12, 28).unwrap_or(NaiveDate::MIN)
}

pub fn validate_name(name: &str) -> Result<(), FieldError> {
    if name.trim().is_empty() {
        return Err(FieldError::Name);
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), FieldError> {
    if description.trim().is_empty() || description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(FieldError::Description);
    }
    Ok(())
}

pub fn validate_release_date(release_date: NaiveDate) -> Result<(), FieldError> {
    if release_date < earliest_release_date() {
        return Err(FieldError::ReleaseDate);
    }
    Ok(())
}

pub fn validate_duration(duration: i32) -> Result<(), FieldError> {
    if duration <= 0 {
        return Err(FieldError::Duration);
    }
    Ok(())
}
