//! Integration tests for the gateway router
//!
//! Exercises the full middleware + handler + projection stack against a
//! mock upstream client, without touching the network.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::Engine;
use serde_json::Value;
use tower::ServiceExt;
use tweet_gateway::api::{create_router, AppState};
use tweet_gateway::config::{AppConfig, Environment};
use tweet_gateway::models::errors::AppResult;
use tweet_gateway::providers::twitter::{
    PostOptions, RawAuthor, RawMedia, RawTweet, RawUser, SearchCriteria, TwitterClient,
};

const TOKEN: &str = "secret-token";

// ============================================
// Mock upstream client
// ============================================

#[derive(Default)]
struct MockTwitter {
    search_results: Vec<RawTweet>,
    tweet: Option<RawTweet>,
    user: Option<RawUser>,
    posted_texts: Mutex<Vec<String>>,
}

fn raw_tweet(id: &str) -> RawTweet {
    RawTweet {
        id: id.to_string(),
        full_text: None,
        created_at: None,
        tweet_by: None,
        like_count: None,
        retweet_count: None,
        reply_count: None,
        media: None,
    }
}

#[async_trait]
impl TwitterClient for MockTwitter {
    async fn search_tweets(
        &self,
        _criteria: &SearchCriteria,
        _count: u32,
    ) -> AppResult<Vec<RawTweet>> {
        Ok(self.search_results.clone())
    }

    async fn tweet_by_id(&self, _id: &str) -> AppResult<Option<RawTweet>> {
        Ok(self.tweet.clone())
    }

    async fn user_by_username(&self, _username: &str) -> AppResult<Option<RawUser>> {
        Ok(self.user.clone())
    }

    async fn post_tweet(&self, text: &str, options: &PostOptions) -> AppResult<RawTweet> {
        self.posted_texts.lock().unwrap().push(text.to_string());
        let mut tweet = raw_tweet("900");
        tweet.full_text = Some(text.to_string());
        tweet.tweet_by = Some(RawAuthor {
            user_name: Some("gateway_user".to_string()),
        });
        let _ = options;
        Ok(tweet)
    }

    async fn delete_tweet(&self, _id: &str) -> AppResult<()> {
        Ok(())
    }

    async fn like_tweet(&self, _id: &str) -> AppResult<()> {
        Ok(())
    }

    async fn unlike_tweet(&self, _id: &str) -> AppResult<()> {
        Ok(())
    }

    async fn retweet(&self, _id: &str) -> AppResult<()> {
        Ok(())
    }

    async fn unretweet(&self, _id: &str) -> AppResult<()> {
        Ok(())
    }

    async fn upload_media(&self, _data: &[u8], _media_type: &str) -> AppResult<String> {
        Ok("media-123".to_string())
    }
}

// ============================================
// Helpers
// ============================================

fn test_config() -> AppConfig {
    AppConfig {
        api_key: Some("upstream-key".to_string()),
        bearer_token: Some(TOKEN.to_string()),
        host: "127.0.0.1".to_string(),
        port: 3000,
        environment: Environment::Development,
        upstream_url: "http://localhost:9".to_string(),
    }
}

fn app_with(mock: MockTwitter) -> Router {
    app_with_config(mock, test_config())
}

fn app_with_config(mock: MockTwitter, config: AppConfig) -> Router {
    create_router(Arc::new(AppState::new(config, Arc::new(mock))))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn authed_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {TOKEN}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap()
}

// ============================================
// Auth gate
// ============================================

const PROTECTED_ROUTES: [(&str, &str); 8] = [
    ("POST", "/tweet"),
    ("POST", "/upload"),
    ("POST", "/tweet/1/reply"),
    ("DELETE", "/tweet/1"),
    ("POST", "/tweet/1/like"),
    ("DELETE", "/tweet/1/like"),
    ("POST", "/tweet/1/retweet"),
    ("DELETE", "/tweet/1/retweet"),
];

#[tokio::test]
async fn protected_routes_require_token() {
    for (method, uri) in PROTECTED_ROUTES {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app_with(MockTwitter::default()), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "MISSING_TOKEN");
        assert!(body["example"].as_str().unwrap().starts_with("Authorization:"));
    }
}

#[tokio::test]
async fn protected_routes_reject_wrong_token() {
    for (method, uri) in PROTECTED_ROUTES {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", "Bearer wrong-token")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app_with(MockTwitter::default()), request).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri}");
        assert_eq!(body["error"], "INVALID_TOKEN");
    }
}

#[tokio::test]
async fn read_routes_need_no_token() {
    let (status, body) = send(app_with(MockTwitter::default()), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert!(body["endpoints"].as_array().unwrap().len() >= 16);
}

// ============================================
// Tweet text validation
// ============================================

#[tokio::test]
async fn post_tweet_rejects_blank_text() {
    for text in ["", "   \t "] {
        let request = authed_json("POST", "/tweet", serde_json::json!({ "text": text }));
        let (status, body) = send(app_with(MockTwitter::default()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "EMPTY_TEXT");
    }
}

#[tokio::test]
async fn post_tweet_rejects_281_chars() {
    let text = "x".repeat(281);
    let request = authed_json("POST", "/tweet", serde_json::json!({ "text": text }));
    let (status, body) = send(app_with(MockTwitter::default()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "TEXT_TOO_LONG");
}

#[tokio::test]
async fn post_tweet_accepts_280_chars_and_forwards() {
    let text = "x".repeat(280);
    let request = authed_json("POST", "/tweet", serde_json::json!({ "text": text }));
    let (status, body) = send(app_with(MockTwitter::default()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["tweet"]["text"], text);
    assert_eq!(body["tweet"]["author"], "gateway_user");
}

#[tokio::test]
async fn reply_validates_text_and_echoes_parent() {
    let request = authed_json("POST", "/tweet/55/reply", serde_json::json!({ "text": "" }));
    let (status, _) = send(app_with(MockTwitter::default()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = authed_json("POST", "/tweet/55/reply", serde_json::json!({ "text": "hi" }));
    let (status, body) = send(app_with(MockTwitter::default()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"]["replyToTweetId"], "55");
    assert_eq!(body["reply"]["text"], "hi");
}

// ============================================
// Search
// ============================================

#[tokio::test]
async fn search_requires_query() {
    let (status, body) = send(app_with(MockTwitter::default()), get("/search")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MISSING_QUERY");
}

#[tokio::test]
async fn search_with_no_results_is_success() {
    let (status, body) = send(
        app_with(MockTwitter::default()),
        get("/search?q=javascript"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["query"], "javascript");
    assert_eq!(body["count"], 0);
    assert_eq!(body["tweets"], serde_json::json!([]));
    assert_eq!(body["message"], "No tweets found for this search query");
}

#[tokio::test]
async fn advanced_search_requires_some_criteria() {
    let (status, body) = send(app_with(MockTwitter::default()), get("/advanced-search")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MISSING_SEARCH_CRITERIA");
}

#[tokio::test]
async fn advanced_search_echoes_criteria() {
    let mock = MockTwitter {
        search_results: vec![raw_tweet("1")],
        ..Default::default()
    };
    let (status, body) = send(
        app_with(mock),
        get("/advanced-search?from_user=jack&has_images=true"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["query"]["fromUser"], "jack");
    assert_eq!(body["query"]["hasImages"], true);
}

// ============================================
// Fetch endpoints
// ============================================

#[tokio::test]
async fn missing_tweet_is_404_with_id_echo() {
    let (status, body) = send(app_with(MockTwitter::default()), get("/tweet/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["tweetId"], "42");
}

#[tokio::test]
async fn sparse_tweet_projects_to_defaults() {
    let mock = MockTwitter {
        tweet: Some(raw_tweet("7")),
        ..Default::default()
    };
    let (status, body) = send(app_with(mock), get("/tweet/7")).await;
    assert_eq!(status, StatusCode::OK);
    let tweet = &body["tweet"];
    assert_eq!(tweet["likes"], 0);
    assert_eq!(tweet["retweets"], 0);
    assert_eq!(tweet["replies"], 0);
    assert_eq!(tweet["media"], serde_json::json!([]));
    assert_eq!(tweet["author"], "unknown");
}

#[tokio::test]
async fn user_timeline_empty_is_404() {
    let (status, body) = send(app_with(MockTwitter::default()), get("/user/ghost")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["username"], "ghost");
}

#[tokio::test]
async fn user_timeline_returns_projected_tweets() {
    let mut tweet = raw_tweet("1");
    tweet.media = Some(vec![RawMedia {
        kind: Some("photo".to_string()),
        url: Some("https://pic/1".to_string()),
    }]);
    let mock = MockTwitter {
        search_results: vec![tweet],
        ..Default::default()
    };
    let (status, body) = send(app_with(mock), get("/user/jack?count=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "jack");
    assert_eq!(body["count"], 1);
    assert_eq!(body["tweets"][0]["media"][0]["type"], "photo");
}

#[tokio::test]
async fn missing_user_info_is_404() {
    let (status, body) = send(app_with(MockTwitter::default()), get("/user/ghost/info")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["username"], "ghost");
}

#[tokio::test]
async fn user_info_projects_profile() {
    let mock = MockTwitter {
        user: Some(RawUser {
            id: "42".to_string(),
            user_name: Some("jack".to_string()),
            full_name: Some("Jack".to_string()),
            description: None,
            followers_count: Some(10),
            following_count: None,
            tweets_count: None,
            is_verified: None,
            created_at: None,
            profile_image: None,
            banner_image: None,
            location: None,
        }),
        ..Default::default()
    };
    let (status, body) = send(app_with(mock), get("/user/jack/info")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "jack");
    assert_eq!(body["user"]["followers"], 10);
    assert_eq!(body["user"]["following"], 0);
    assert_eq!(body["user"]["verified"], false);
}

// ============================================
// Upload
// ============================================

#[tokio::test]
async fn upload_rejects_unsupported_type() {
    let request = authed_json(
        "POST",
        "/upload",
        serde_json::json!({ "media_data": "aGVsbG8=", "media_type": "text/plain" }),
    );
    let (status, body) = send(app_with(MockTwitter::default()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "UNSUPPORTED_MEDIA_TYPE");
}

#[tokio::test]
async fn upload_requires_both_fields() {
    let request = authed_json(
        "POST",
        "/upload",
        serde_json::json!({ "media_type": "image/png" }),
    );
    let (status, body) = send(app_with(MockTwitter::default()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MISSING_MEDIA_FIELDS");
}

#[tokio::test]
async fn upload_reports_decoded_size() {
    let payload = b"png bytes here";
    let encoded = base64::engine::general_purpose::STANDARD.encode(payload);
    let request = authed_json(
        "POST",
        "/upload",
        serde_json::json!({ "media_data": encoded, "media_type": "image/png" }),
    );
    let (status, body) = send(app_with(MockTwitter::default()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["media_id"], "media-123");
    assert_eq!(body["media_type"], "image/png");
    assert_eq!(body["size"], payload.len());
}

#[tokio::test]
async fn upload_media_type_is_case_insensitive() {
    let encoded = base64::engine::general_purpose::STANDARD.encode(b"gif");
    let request = authed_json(
        "POST",
        "/upload",
        serde_json::json!({ "media_data": encoded, "media_type": "IMAGE/GIF" }),
    );
    let (status, body) = send(app_with(MockTwitter::default()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["media_type"], "image/gif");
}

// ============================================
// Actions
// ============================================

#[tokio::test]
async fn delete_echoes_tweet_id() {
    let (status, body) = send(app_with(MockTwitter::default()), authed("DELETE", "/tweet/9")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["tweetId"], "9");
}

#[tokio::test]
async fn like_and_retweet_report_actions() {
    let cases = [
        ("POST", "/tweet/9/like", "liked"),
        ("DELETE", "/tweet/9/like", "unliked"),
        ("POST", "/tweet/9/retweet", "retweeted"),
        ("DELETE", "/tweet/9/retweet", "unretweeted"),
    ];
    for (method, uri, action) in cases {
        let (status, body) = send(app_with(MockTwitter::default()), authed(method, uri)).await;
        assert_eq!(status, StatusCode::OK, "{method} {uri}");
        assert_eq!(body["action"], action);
        assert_eq!(body["tweetId"], "9");
    }
}

#[tokio::test]
async fn mutating_routes_need_api_key() {
    let config = AppConfig {
        api_key: None,
        ..test_config()
    };
    let (status, body) = send(
        app_with_config(MockTwitter::default(), config),
        authed_json("POST", "/tweet", serde_json::json!({ "text": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "API_KEY_REQUIRED");
}

// ============================================
// Health, trending, fallback
// ============================================

#[tokio::test]
async fn health_is_503_when_unconfigured() {
    let config = AppConfig {
        api_key: None,
        ..test_config()
    };
    let (status, body) = send(app_with_config(MockTwitter::default(), config), get("/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn health_reports_healthy_when_configured() {
    let (status, body) = send(app_with(MockTwitter::default()), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn trending_requires_api_key() {
    let config = AppConfig {
        api_key: None,
        ..test_config()
    };
    let (status, body) = send(app_with_config(MockTwitter::default(), config), get("/trending")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "API_KEY_REQUIRED");

    // With a key, it is a 200 placeholder
    let (status, body) = send(app_with(MockTwitter::default()), get("/trending")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unknown_route_returns_hint() {
    let (status, body) = send(app_with(MockTwitter::default()), get("/nonexistent")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("GET /nonexistent"));
    assert!(!body["availableEndpoints"].as_array().unwrap().is_empty());
}
