//! Upstream Twitter client adapter
//!
//! Narrow interface over a rettiwt-compatible REST upstream. The upstream
//! owns sessions, request signing, and the platform wire protocol; this
//! layer forwards operations and hands failures through unmodified. No
//! retries, no timeout enforcement here.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::errors::{AppError, AppResult};

/// Filters accepted by the search operation.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Restrict to tweets by this username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_user: Option<String>,
    /// Keyword that must appear in the tweet text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Only tweets with image attachments
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_images: bool,
    /// Only tweets with video attachments
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_videos: bool,
}

/// Options for posting a tweet or reply.
#[derive(Debug, Clone, Default)]
pub struct PostOptions {
    pub media_ids: Vec<String>,
    pub reply_to: Option<String>,
}

// ============================================
// Raw wire types (upstream camelCase JSON)
// ============================================

/// A tweet record as the upstream returns it. Every field beyond the id
/// is optional; the projector substitutes defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTweet {
    pub id: String,
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub tweet_by: Option<RawAuthor>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub retweet_count: Option<u64>,
    #[serde(default)]
    pub reply_count: Option<u64>,
    #[serde(default)]
    pub media: Option<Vec<RawMedia>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAuthor {
    #[serde(default)]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMedia {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A user profile record as the upstream returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    pub id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub following_count: Option<u64>,
    #[serde(default)]
    pub tweets_count: Option<u64>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub banner_image: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Search result page from the upstream.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    list: Vec<RawTweet>,
}

/// Upload result from the upstream.
#[derive(Debug, Deserialize)]
struct UploadResult {
    id: String,
}

// ============================================
// Adapter trait
// ============================================

/// The narrow interface the rest of the gateway depends on.
#[async_trait]
pub trait TwitterClient: Send + Sync {
    async fn search_tweets(
        &self,
        criteria: &SearchCriteria,
        count: u32,
    ) -> AppResult<Vec<RawTweet>>;

    async fn tweet_by_id(&self, id: &str) -> AppResult<Option<RawTweet>>;

    async fn user_by_username(&self, username: &str) -> AppResult<Option<RawUser>>;

    async fn post_tweet(&self, text: &str, options: &PostOptions) -> AppResult<RawTweet>;

    async fn delete_tweet(&self, id: &str) -> AppResult<()>;

    async fn like_tweet(&self, id: &str) -> AppResult<()>;

    async fn unlike_tweet(&self, id: &str) -> AppResult<()>;

    async fn retweet(&self, id: &str) -> AppResult<()>;

    async fn unretweet(&self, id: &str) -> AppResult<()>;

    /// Returns the opaque media identifier assigned by the platform.
    async fn upload_media(&self, data: &[u8], media_type: &str) -> AppResult<String>;
}

// ============================================
// HTTP implementation
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostTweetBody<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    media_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to_tweet_id: Option<String>,
}

/// reqwest-backed client for a rettiwt-compatible upstream.
pub struct RettiwtClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RettiwtClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, url);
        if let Some(key) = &self.api_key {
            req = req.header("x-api-key", key);
        }
        req
    }

    /// Run a mutation endpoint that returns no body of interest.
    async fn send_action(&self, method: reqwest::Method, path: &str, context: &str) -> AppResult<()> {
        let response = self.request(method, path).send().await?;
        Self::check_status(response, context).await?;
        Ok(())
    }

    /// Map non-success upstream statuses to a pass-through failure.
    async fn check_status(
        response: reqwest::Response,
        context: &str,
    ) -> AppResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::upstream(
            context,
            format!("upstream returned {status}: {body}"),
        ))
    }
}

#[async_trait]
impl TwitterClient for RettiwtClient {
    async fn search_tweets(
        &self,
        criteria: &SearchCriteria,
        count: u32,
    ) -> AppResult<Vec<RawTweet>> {
        debug!(?criteria, count, "searching tweets");
        let response = self
            .request(reqwest::Method::POST, "/tweet/search")
            .query(&[("count", count)])
            .json(criteria)
            .send()
            .await?;
        let page: SearchPage = Self::check_status(response, "search tweets")
            .await?
            .json()
            .await?;
        Ok(page.list)
    }

    async fn tweet_by_id(&self, id: &str) -> AppResult<Option<RawTweet>> {
        debug!(id, "fetching tweet");
        let response = self
            .request(reqwest::Method::GET, &format!("/tweet/{id}"))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let tweet = Self::check_status(response, "fetch tweet")
            .await?
            .json()
            .await?;
        Ok(Some(tweet))
    }

    async fn user_by_username(&self, username: &str) -> AppResult<Option<RawUser>> {
        debug!(username, "fetching user");
        let response = self
            .request(reqwest::Method::GET, &format!("/user/{username}"))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let user = Self::check_status(response, "fetch user information")
            .await?
            .json()
            .await?;
        Ok(Some(user))
    }

    async fn post_tweet(&self, text: &str, options: &PostOptions) -> AppResult<RawTweet> {
        debug!(len = text.len(), "posting tweet");
        let body = PostTweetBody {
            text,
            media_ids: options.media_ids.clone(),
            reply_to_tweet_id: options.reply_to.clone(),
        };
        let response = self
            .request(reqwest::Method::POST, "/tweet")
            .json(&body)
            .send()
            .await?;
        let tweet = Self::check_status(response, "post tweet")
            .await?
            .json()
            .await?;
        Ok(tweet)
    }

    async fn delete_tweet(&self, id: &str) -> AppResult<()> {
        self.send_action(reqwest::Method::DELETE, &format!("/tweet/{id}"), "delete tweet")
            .await
    }

    async fn like_tweet(&self, id: &str) -> AppResult<()> {
        self.send_action(reqwest::Method::POST, &format!("/tweet/{id}/like"), "like tweet")
            .await
    }

    async fn unlike_tweet(&self, id: &str) -> AppResult<()> {
        self.send_action(
            reqwest::Method::DELETE,
            &format!("/tweet/{id}/like"),
            "unlike tweet",
        )
        .await
    }

    async fn retweet(&self, id: &str) -> AppResult<()> {
        self.send_action(
            reqwest::Method::POST,
            &format!("/tweet/{id}/retweet"),
            "retweet",
        )
        .await
    }

    async fn unretweet(&self, id: &str) -> AppResult<()> {
        self.send_action(
            reqwest::Method::DELETE,
            &format!("/tweet/{id}/retweet"),
            "unretweet",
        )
        .await
    }

    async fn upload_media(&self, data: &[u8], media_type: &str) -> AppResult<String> {
        debug!(size = data.len(), media_type, "uploading media");
        let response = self
            .request(reqwest::Method::POST, "/media/upload")
            .header("content-type", media_type.to_string())
            .body(data.to_vec())
            .send()
            .await?;
        let result: UploadResult = Self::check_status(response, "upload media")
            .await?
            .json()
            .await?;
        Ok(result.id)
    }
}
