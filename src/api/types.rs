//! API request/response types
//!
//! One success shape per route, every outbound body carrying `success`.
//! Error envelopes are produced here from `AppError`, with upstream
//! detail exposed only in development mode.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::config::current_environment;
use crate::models::errors::AppError;
use crate::models::types::{Tweet, UserProfile};

// ============================================
// Request bodies / query params
// ============================================

#[derive(Debug, Deserialize)]
pub struct PostTweetRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub media_ids: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub media_data: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CountParams {
    pub count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdvancedSearchParams {
    pub q: Option<String>,
    pub from_user: Option<String>,
    pub has_images: Option<String>,
    pub has_videos: Option<String>,
    pub count: Option<String>,
}

// ============================================
// Success shapes
// ============================================

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub status: &'static str,
    #[serde(rename = "authMode")]
    pub auth_mode: &'static str,
    pub environment: &'static str,
    pub endpoints: Vec<&'static str>,
    pub examples: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub success: bool,
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub environment: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UserTweetsResponse {
    pub success: bool,
    pub username: String,
    pub count: usize,
    pub tweets: Vec<Tweet>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub count: usize,
    pub tweets: Vec<Tweet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct AdvancedSearchResponse {
    pub success: bool,
    /// Echo of the criteria actually sent upstream
    pub query: serde_json::Value,
    pub count: usize,
    pub tweets: Vec<Tweet>,
}

#[derive(Debug, Serialize)]
pub struct TweetResponse {
    pub success: bool,
    pub tweet: Tweet,
}

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub success: bool,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct PostTweetResponse {
    pub success: bool,
    pub message: &'static str,
    pub tweet: Tweet,
}

#[derive(Debug, Serialize)]
pub struct ReplyTweet {
    #[serde(flatten)]
    pub tweet: Tweet,
    #[serde(rename = "replyToTweetId")]
    pub reply_to_tweet_id: String,
}

#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub success: bool,
    pub message: &'static str,
    pub reply: ReplyTweet,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: &'static str,
    pub media_id: String,
    pub media_type: String,
    pub size: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(rename = "tweetId")]
    pub tweet_id: String,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(rename = "tweetId")]
    pub tweet_id: String,
    pub action: &'static str,
}

/// Body for /trending, which the platform side has not implemented.
/// Served with HTTP 200, mirroring the documented behavior.
#[derive(Debug, Serialize)]
pub struct TrendingPlaceholder {
    pub success: bool,
    pub error: &'static str,
    pub message: &'static str,
    pub note: &'static str,
}

// ============================================
// Error envelope
// ============================================

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "tweetId", skip_serializing_if = "Option::is_none")]
    pub tweet_id: Option<String>,
    pub error_id: String,
    pub timestamp: i64,
}

/// Fallback body for unmatched routes.
#[derive(Debug, Serialize)]
pub struct NotFoundBody {
    pub success: bool,
    pub error: &'static str,
    pub message: String,
    #[serde(rename = "availableEndpoints")]
    pub available_endpoints: Vec<&'static str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let error_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(code = self.code_str(), error_id = %error_id, "{}", self.message);
        } else {
            tracing::warn!(code = self.code_str(), "{}", self.message);
        }

        // Raw upstream detail stays internal in production
        let details = if current_environment().is_production() {
            None
        } else {
            self.details
        };

        let body = ErrorBody {
            success: false,
            error: self.code.as_str(),
            message: self.message,
            suggestion: self.suggestion,
            example: self.example,
            details,
            username: self.username,
            tweet_id: self.tweet_id,
            error_id,
            timestamp: chrono::Utc::now().timestamp(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::MediaItem;

    fn sample_tweet() -> Tweet {
        Tweet {
            id: "1".into(),
            text: "hi".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
            author: "jack".into(),
            likes: 0,
            retweets: 0,
            replies: 0,
            media: vec![MediaItem {
                kind: "photo".into(),
                url: "https://pic/1".into(),
            }],
        }
    }

    #[test]
    fn test_reply_flattens_tweet_fields() {
        let reply = ReplyTweet {
            tweet: sample_tweet(),
            reply_to_tweet_id: "99".into(),
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["replyToTweetId"], "99");
        assert_eq!(json["media"][0]["type"], "photo");
    }

    #[test]
    fn test_search_response_omits_empty_message() {
        let body = SearchResponse {
            success: true,
            query: "rust".into(),
            count: 0,
            tweets: vec![],
            message: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("message").is_none());
        assert_eq!(json["count"], 0);
    }
}
