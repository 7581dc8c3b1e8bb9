//! Field validation shared by construction and the setters.
//!
//! Every function here is pure: it returns the cleaned value or the reason
//! the input was rejected, and never logs. Callers decide how to report.

use crate::error::ValidationError;

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// Trim a title, rejecting empty or whitespace-only input.
pub fn title(raw: &str) -> Result<String, ValidationError> {
    non_blank(raw).ok_or(ValidationError::EmptyTitle)
}

/// Trim an artist name, rejecting empty or whitespace-only input.
pub fn artist(raw: &str) -> Result<String, ValidationError> {
    non_blank(raw).ok_or(ValidationError::EmptyArtist)
}

/// Accept a strictly positive number of seconds.
pub fn duration(secs: i64) -> Result<u64, ValidationError> {
    u64::try_from(secs)
        .ok()
        .filter(|s| *s > 0)
        .ok_or(ValidationError::NonPositiveDuration(secs))
}

/// Accept a rating in `MIN_RATING..=MAX_RATING`.
pub fn rating(value: i64) -> Result<u8, ValidationError> {
    u8::try_from(value)
        .ok()
        .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
        .ok_or(ValidationError::RatingOutOfRange(value))
}

/// Trim a tag, rejecting empty or whitespace-only input.
pub fn tag(raw: &str) -> Result<String, ValidationError> {
    non_blank(raw).ok_or(ValidationError::EmptyTag)
}

/// Lowercase form used for comparisons only. Never stored.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
