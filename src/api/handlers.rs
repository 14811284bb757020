//! API request handlers
//!
//! Each handler sequences validation, upstream call, projection, and
//! envelope construction. Failures short-circuit into `AppError`, which
//! serializes to the uniform error envelope.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Json, Path, Query, State};
use axum::http::{Method, StatusCode, Uri};
use base64::Engine;
use tracing::info;

use super::types::*;
use super::validate::{parse_count, validate_media_type, validate_tweet_text};
use crate::config::AppConfig;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::{Tweet, UserProfile};
use crate::providers::twitter::{PostOptions, SearchCriteria, TwitterClient};

/// Shared application state. Built once at startup, read-only afterwards.
pub struct AppState {
    pub config: AppConfig,
    pub twitter: Arc<dyn TwitterClient>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, twitter: Arc<dyn TwitterClient>) -> Self {
        Self {
            config,
            twitter,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Endpoint list served by the banner.
const ENDPOINTS: [&str; 16] = [
    "GET / - Health check and API information",
    "GET /health - Service health and configuration status",
    "GET /user/:username - Get tweets from user",
    "GET /search?q=keyword - Search tweets",
    "GET /tweet/:id - Get specific tweet",
    "GET /user/:username/info - Get user information",
    "GET /trending - Trending topics (requires auth)",
    "GET /advanced-search - Advanced search with filters",
    "POST /tweet - Post a new tweet (requires auth)",
    "POST /upload - Upload media for tweets (requires auth)",
    "POST /tweet/:id/reply - Reply to a tweet (requires auth)",
    "DELETE /tweet/:id - Delete a tweet (requires auth)",
    "POST /tweet/:id/like - Like a tweet (requires auth)",
    "DELETE /tweet/:id/like - Unlike a tweet (requires auth)",
    "POST /tweet/:id/retweet - Retweet a tweet (requires auth)",
    "DELETE /tweet/:id/retweet - Unretweet a tweet (requires auth)",
];

/// Shorter hint list for the 404 fallback.
const AVAILABLE_ENDPOINTS: [&str; 7] = [
    "GET /",
    "GET /user/:username",
    "GET /search?q=keyword",
    "GET /tweet/:id",
    "GET /user/:username/info",
    "GET /trending",
    "GET /advanced-search",
];

// ============================================
// Banner & health
// ============================================

pub async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    let port = state.config.port;
    Json(ServiceInfo {
        message: "Twitter Gateway API",
        status: "running",
        auth_mode: state.config.auth_mode(),
        environment: state.config.environment.as_str(),
        endpoints: ENDPOINTS.to_vec(),
        examples: vec![
            format!("http://localhost:{port}/user/elonmusk"),
            format!("http://localhost:{port}/search?q=javascript"),
            format!("http://localhost:{port}/user/elonmusk/info"),
            format!("http://localhost:{port}/tweet/1234567890123456789"),
        ],
    })
}

pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthData>, AppError> {
    if !state.config.is_configured() {
        return Err(AppError::service_unavailable(
            "API key or bearer token is not configured",
        ));
    }
    Ok(Json(HealthData {
        success: true,
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        environment: state.config.environment.as_str(),
    }))
}

// ============================================
// Read endpoints
// ============================================

pub async fn user_tweets(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Query(params): Query<CountParams>,
) -> Result<Json<UserTweetsResponse>, AppError> {
    let count = parse_count(params.count.as_deref());
    info!(%username, count, "Fetching user tweets");

    let criteria = SearchCriteria {
        from_user: Some(username.clone()),
        ..Default::default()
    };
    let raw = state.twitter.search_tweets(&criteria, count).await?;

    if raw.is_empty() {
        return Err(AppError::no_tweets_found(username));
    }

    let tweets: Vec<Tweet> = raw.into_iter().map(Tweet::from).collect();
    Ok(Json(UserTweetsResponse {
        success: true,
        username,
        count: tweets.len(),
        tweets,
    }))
}

pub async fn search_tweets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let Some(query) = params.q.filter(|q| !q.is_empty()) else {
        return Err(AppError::validation(
            ErrorCode::MissingQuery,
            "Query parameter \"q\" is required",
        ));
    };
    let count = parse_count(params.count.as_deref());
    info!(%query, count, "Searching tweets");

    let criteria = SearchCriteria {
        keyword: Some(query.clone()),
        ..Default::default()
    };
    let raw = state.twitter.search_tweets(&criteria, count).await?;

    let tweets: Vec<Tweet> = raw.into_iter().map(Tweet::from).collect();
    let message = tweets
        .is_empty()
        .then_some("No tweets found for this search query");
    Ok(Json(SearchResponse {
        success: true,
        query,
        count: tweets.len(),
        tweets,
        message,
    }))
}

pub async fn tweet_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TweetResponse>, AppError> {
    info!(%id, "Fetching tweet");

    let raw = state
        .twitter
        .tweet_by_id(&id)
        .await?
        .ok_or_else(|| AppError::tweet_not_found(&id))?;

    Ok(Json(TweetResponse {
        success: true,
        tweet: Tweet::from(raw),
    }))
}

pub async fn user_info(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<UserInfoResponse>, AppError> {
    info!(%username, "Fetching user info");

    let raw = state
        .twitter
        .user_by_username(&username)
        .await?
        .ok_or_else(|| AppError::user_not_found(&username))?;

    Ok(Json(UserInfoResponse {
        success: true,
        user: UserProfile::from(raw),
    }))
}

pub async fn advanced_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AdvancedSearchParams>,
) -> Result<Json<AdvancedSearchResponse>, AppError> {
    if params.q.is_none() && params.from_user.is_none() {
        return Err(AppError::validation(
            ErrorCode::MissingSearchCriteria,
            "Either \"q\" (query) or \"from_user\" parameter is required",
        ));
    }
    let count = parse_count(params.count.as_deref());

    let criteria = SearchCriteria {
        keyword: params.q,
        from_user: params.from_user,
        has_images: params.has_images.as_deref() == Some("true"),
        has_videos: params.has_videos.as_deref() == Some("true"),
    };
    info!(?criteria, count, "Advanced search");

    let raw = state.twitter.search_tweets(&criteria, count).await?;

    let tweets: Vec<Tweet> = raw.into_iter().map(Tweet::from).collect();
    Ok(Json(AdvancedSearchResponse {
        success: true,
        query: serde_json::to_value(&criteria)?,
        count: tweets.len(),
        tweets,
    }))
}

pub async fn trending(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TrendingPlaceholder>, AppError> {
    require_api_key(&state, "this feature")?;

    // Not implemented upstream; served as a 200 placeholder.
    Ok(Json(TrendingPlaceholder {
        success: false,
        error: "Trending topics endpoint not yet implemented",
        message: "This feature requires additional implementation",
        note: "You can use the search endpoint to find popular tweets instead",
    }))
}

// ============================================
// Mutating endpoints (behind the bearer gate)
// ============================================

pub async fn post_tweet(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PostTweetRequest>,
) -> Result<Json<PostTweetResponse>, AppError> {
    require_api_key(&state, "posting tweets")?;
    validate_tweet_text(&req.text, "Tweet")?;
    info!(chars = req.text.chars().count(), "Posting new tweet");

    let options = PostOptions {
        media_ids: req.media_ids.unwrap_or_default(),
        reply_to: None,
    };
    let raw = state.twitter.post_tweet(&req.text, &options).await?;

    Ok(Json(PostTweetResponse {
        success: true,
        message: "Tweet posted successfully",
        tweet: Tweet::from(raw),
    }))
}

pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UploadRequest>,
) -> Result<Json<UploadResponse>, AppError> {
    require_api_key(&state, "uploading media")?;

    let (Some(media_data), Some(media_type)) = (req.media_data, req.media_type) else {
        return Err(AppError::validation(
            ErrorCode::MissingMediaFields,
            "Please provide \"media_data\" (base64) and \"media_type\" (image/jpeg, image/png, video/mp4, etc.)",
        ));
    };

    let media_type = validate_media_type(&media_type)?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(media_data.as_bytes())
        .map_err(|e| {
            AppError::validation(ErrorCode::InvalidMediaData, "media_data is not valid base64")
                .with_details(e.to_string())
        })?;

    info!(%media_type, size = bytes.len(), "Uploading media");

    let media_id = state.twitter.upload_media(&bytes, &media_type).await?;

    Ok(Json(UploadResponse {
        success: true,
        message: "Media uploaded successfully",
        media_id,
        media_type,
        size: bytes.len(),
    }))
}

pub async fn reply_to_tweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<PostTweetRequest>,
) -> Result<Json<ReplyResponse>, AppError> {
    require_api_key(&state, "replying to tweets")?;
    validate_tweet_text(&req.text, "Reply")?;
    info!(%id, "Replying to tweet");

    let options = PostOptions {
        media_ids: req.media_ids.unwrap_or_default(),
        reply_to: Some(id.clone()),
    };
    let raw = state.twitter.post_tweet(&req.text, &options).await?;

    Ok(Json(ReplyResponse {
        success: true,
        message: "Reply posted successfully",
        reply: ReplyTweet {
            tweet: Tweet::from(raw),
            reply_to_tweet_id: id,
        },
    }))
}

pub async fn delete_tweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    require_api_key(&state, "deleting tweets")?;
    info!(%id, "Deleting tweet");

    state.twitter.delete_tweet(&id).await?;

    Ok(Json(DeleteResponse {
        success: true,
        message: "Tweet deleted successfully",
        tweet_id: id,
    }))
}

pub async fn like_tweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, AppError> {
    require_api_key(&state, "liking tweets")?;
    info!(%id, "Liking tweet");

    state.twitter.like_tweet(&id).await?;
    Ok(action_response(id, "liked", "Tweet liked successfully"))
}

pub async fn unlike_tweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, AppError> {
    require_api_key(&state, "unliking tweets")?;
    info!(%id, "Unliking tweet");

    state.twitter.unlike_tweet(&id).await?;
    Ok(action_response(id, "unliked", "Tweet unliked successfully"))
}

pub async fn retweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, AppError> {
    require_api_key(&state, "retweeting")?;
    info!(%id, "Retweeting tweet");

    state.twitter.retweet(&id).await?;
    Ok(action_response(id, "retweeted", "Tweet retweeted successfully"))
}

pub async fn unretweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, AppError> {
    require_api_key(&state, "unretweeting")?;
    info!(%id, "Unretweeting tweet");

    state.twitter.unretweet(&id).await?;
    Ok(action_response(id, "unretweeted", "Tweet unretweeted successfully"))
}

// ============================================
// Fallback
// ============================================

pub async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<NotFoundBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundBody {
            success: false,
            error: "ROUTE_NOT_FOUND",
            message: format!("The endpoint {method} {} does not exist", uri.path()),
            available_endpoints: AVAILABLE_ENDPOINTS.to_vec(),
        }),
    )
}

// ============================================
// Helper functions
// ============================================

/// Mutating operations need the upstream credential in addition to the
/// bearer token.
fn require_api_key<'a>(state: &'a AppState, action: &str) -> AppResult<&'a str> {
    state
        .config
        .api_key
        .as_deref()
        .ok_or_else(|| AppError::api_key_required(action))
}

fn action_response(
    tweet_id: String,
    action: &'static str,
    message: &'static str,
) -> Json<ActionResponse> {
    Json(ActionResponse {
        success: true,
        message,
        tweet_id,
        action,
    })
}
