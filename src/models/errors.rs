//! Centralized error handling
//!
//! Every failure the gateway can produce carries a unique error code.
//! Validation and auth failures are constructed at the point of
//! detection; upstream failures pass the collaborator's message through
//! unmodified and are only exposed verbatim in development mode.

use std::fmt;

/// Application-wide error type. All handler failures flow through this.
#[derive(Debug)]
pub struct AppError {
    /// Unique error code, also determines the HTTP status
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Actionable hint for the caller
    pub suggestion: Option<String>,
    /// Usage example (auth failures)
    pub example: Option<String>,
    /// Raw underlying detail, development mode only
    pub details: Option<String>,
    /// Username echoed back on user-scoped failures
    pub username: Option<String>,
    /// Tweet id echoed back on tweet-scoped failures
    pub tweet_id: Option<String>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            suggestion: None,
            example: None,
            details: None,
            username: None,
            tweet_id: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Error code as string (for logging and the response envelope)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {}

/// Unique error codes. Fine-grained per failure site, grouped into the
/// HTTP taxonomy by `http_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Auth errors
    // ============================================
    /// Authorization header absent
    MissingToken,
    /// Bearer token does not match the configured secret
    InvalidToken,
    /// Upstream API key not configured
    ApiKeyRequired,

    // ============================================
    // Validation errors
    // ============================================
    /// Tweet/reply text blank after trimming
    EmptyText,
    /// Tweet/reply text over 280 characters
    TextTooLong,
    /// Search query parameter missing
    MissingQuery,
    /// Neither query nor from_user given to advanced search
    MissingSearchCriteria,
    /// media_data or media_type missing from upload
    MissingMediaFields,
    /// Media type outside the allow-list
    UnsupportedMediaType,
    /// media_data is not valid base64
    InvalidMediaData,

    // ============================================
    // Not found
    // ============================================
    /// Tweet, user, or empty user timeline
    NotFound,
    /// No route matched the request
    RouteNotFound,

    // ============================================
    // Upstream / availability
    // ============================================
    /// Any error surfaced by the external client
    UpstreamFailure,
    /// Dependent service unreachable or gateway unconfigured
    ServiceUnavailable,
}

impl ErrorCode {
    /// String representation for envelopes and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::ApiKeyRequired => "API_KEY_REQUIRED",
            Self::EmptyText => "EMPTY_TEXT",
            Self::TextTooLong => "TEXT_TOO_LONG",
            Self::MissingQuery => "MISSING_QUERY",
            Self::MissingSearchCriteria => "MISSING_SEARCH_CRITERIA",
            Self::MissingMediaFields => "MISSING_MEDIA_FIELDS",
            Self::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            Self::InvalidMediaData => "INVALID_MEDIA_DATA",
            Self::NotFound => "NOT_FOUND",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::UpstreamFailure => "UPSTREAM_FAILURE",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::EmptyText
            | Self::TextTooLong
            | Self::MissingQuery
            | Self::MissingSearchCriteria
            | Self::MissingMediaFields
            | Self::UnsupportedMediaType
            | Self::InvalidMediaData => 400,
            Self::MissingToken | Self::ApiKeyRequired => 401,
            Self::InvalidToken => 403,
            Self::NotFound | Self::RouteNotFound => 404,
            Self::UpstreamFailure => 500,
            Self::ServiceUnavailable => 503,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Authorization header absent
    pub fn missing_token() -> Self {
        let mut err = Self::new(
            ErrorCode::MissingToken,
            "Please provide a valid Bearer token in Authorization header",
        );
        err.example = Some("Authorization: Bearer your-token-here".to_string());
        err
    }

    /// Bearer token mismatch
    pub fn invalid_token() -> Self {
        Self::new(ErrorCode::InvalidToken, "The provided token is not valid")
    }

    /// Upstream API key unset
    pub fn api_key_required(action: &str) -> Self {
        Self::new(
            ErrorCode::ApiKeyRequired,
            format!("API key is required for {action}"),
        )
    }

    /// Tweet not found; echoes the id
    pub fn tweet_not_found(id: impl Into<String>) -> Self {
        let mut err = Self::new(ErrorCode::NotFound, "Tweet not found")
            .with_suggestion("Check if the tweet ID is correct and the tweet exists");
        err.tweet_id = Some(id.into());
        err
    }

    /// User not found; echoes the username
    pub fn user_not_found(username: impl Into<String>) -> Self {
        let mut err = Self::new(ErrorCode::NotFound, "User not found")
            .with_suggestion("Check if the username is correct and the user exists");
        err.username = Some(username.into());
        err
    }

    /// User exists but has no tweets matching; echoes the username
    pub fn no_tweets_found(username: impl Into<String>) -> Self {
        let mut err = Self::new(ErrorCode::NotFound, "No tweets found for this user")
            .with_suggestion("Try with a different username or check if the user exists");
        err.username = Some(username.into());
        err
    }

    /// Validation failure with an explicit code
    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code, message)
    }

    /// Error surfaced by the external client, message passed through
    pub fn upstream(context: &str, err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::UpstreamFailure, format!("Failed to {context}"))
            .with_details(err.to_string())
    }

    /// Dependent service unreachable or required config missing
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::new(ErrorCode::ServiceUnavailable, "Upstream service unreachable")
                .with_details(err.to_string())
        } else {
            Self::new(ErrorCode::UpstreamFailure, "Upstream request failed")
                .with_details(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorCode::UpstreamFailure, "Invalid upstream response")
            .with_details(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::missing_token();
        assert_eq!(err.code, ErrorCode::MissingToken);
        assert_eq!(err.code_str(), "MISSING_TOKEN");
        assert!(err.example.is_some());
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::MissingToken.http_status(), 401);
        assert_eq!(ErrorCode::InvalidToken.http_status(), 403);
        assert_eq!(ErrorCode::TextTooLong.http_status(), 400);
        assert_eq!(ErrorCode::UnsupportedMediaType.http_status(), 400);
        assert_eq!(ErrorCode::NotFound.http_status(), 404);
        assert_eq!(ErrorCode::RouteNotFound.http_status(), 404);
        assert_eq!(ErrorCode::UpstreamFailure.http_status(), 500);
        assert_eq!(ErrorCode::ServiceUnavailable.http_status(), 503);
    }

    #[test]
    fn test_echo_fields() {
        let err = AppError::tweet_not_found("123");
        assert_eq!(err.tweet_id.as_deref(), Some("123"));
        assert!(err.username.is_none());

        let err = AppError::no_tweets_found("jack");
        assert_eq!(err.username.as_deref(), Some("jack"));
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_upstream_passthrough() {
        let err = AppError::upstream("post tweet", "boom");
        assert_eq!(err.code, ErrorCode::UpstreamFailure);
        assert_eq!(err.details.as_deref(), Some("boom"));
        assert_eq!(err.to_string(), "[UPSTREAM_FAILURE] Failed to post tweet");
    }
}
