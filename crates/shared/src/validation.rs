//! Common validation utilities.

use chrono::NaiveDate;
use validator::ValidationError;

/// Maximum length of a trip title.
pub const MAX_TRIP_TITLE_LENGTH: usize = 120;

/// Normalizes an email address for comparison: trims and lowercases.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Compares two email addresses ignoring letter case and surrounding whitespace.
pub fn emails_match(a: &str, b: &str) -> bool {
    normalize_email(a) == normalize_email(b)
}

/// Validates that a trip title is not blank and within length limits.
pub fn validate_trip_title(title: &str) -> Result<(), ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("title_blank");
        err.message = Some("Title cannot be blank".into());
        return Err(err);
    }
    if trimmed.chars().count() > MAX_TRIP_TITLE_LENGTH {
        let mut err = ValidationError::new("title_length");
        err.message = Some("Title must be at most 120 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates that a trip does not end before it starts.
pub fn validate_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => {
            let mut err = ValidationError::new("date_range");
            err.message = Some("end_date cannot be before start_date".into());
            Err(err)
        }
        _ => Ok(()),
    }
}
