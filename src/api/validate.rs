//! Per-route request validation
//!
//! Pure checks applied before any upstream call. Failures carry the
//! fine-grained validation codes from the error taxonomy.

use crate::models::errors::{AppError, AppResult, ErrorCode};

/// Media types accepted by the upload endpoint.
pub const ALLOWED_MEDIA_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "video/mp4",
    "video/mov",
];

/// Maximum tweet length in characters.
pub const MAX_TWEET_CHARS: usize = 280;

/// Validate tweet/reply text: non-blank after trimming, at most 280
/// characters. Returns the text unchanged on success.
pub fn validate_tweet_text<'a>(text: &'a str, what: &str) -> AppResult<&'a str> {
    if text.trim().is_empty() {
        return Err(AppError::validation(
            ErrorCode::EmptyText,
            format!(
                "Please provide {} content in the \"text\" field",
                what.to_lowercase()
            ),
        ));
    }
    if text.chars().count() > MAX_TWEET_CHARS {
        return Err(AppError::validation(
            ErrorCode::TextTooLong,
            format!("{what} must be 280 characters or less"),
        ));
    }
    Ok(text)
}

/// Validate an upload media type against the allow-list,
/// case-insensitively. Returns the lowercased type.
pub fn validate_media_type(media_type: &str) -> AppResult<String> {
    let normalized = media_type.to_lowercase();
    if ALLOWED_MEDIA_TYPES.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(AppError::validation(
            ErrorCode::UnsupportedMediaType,
            format!("Supported types: {}", ALLOWED_MEDIA_TYPES.join(", ")),
        )
        .with_details(format!("provided: {media_type}")))
    }
}

/// Parse a count query value. Absent or unparsable values fall back to
/// 20; no upper bound is enforced.
pub fn parse_count(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.parse().ok()).unwrap_or(20)
}
