//! Projected response entities
//!
//! Stable JSON shapes built from the upstream client's raw records.
//! Projection is total: absent numeric fields become 0, absent nested
//! objects become placeholders, never null or missing keys.

use serde::Serialize;

use crate::providers::twitter::{RawMedia, RawTweet, RawUser};

/// A tweet as served by the gateway.
#[derive(Debug, Clone, Serialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub author: String,
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
    pub media: Vec<MediaItem>,
}

/// A media attachment on a tweet.
#[derive(Debug, Clone, Serialize)]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

impl From<RawMedia> for MediaItem {
    fn from(raw: RawMedia) -> Self {
        Self {
            kind: raw.kind.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
        }
    }
}

impl From<RawTweet> for Tweet {
    fn from(raw: RawTweet) -> Self {
        Self {
            id: raw.id,
            text: raw.full_text.unwrap_or_default(),
            created_at: raw.created_at.unwrap_or_default(),
            author: raw
                .tweet_by
                .and_then(|a| a.user_name)
                .unwrap_or_else(|| "unknown".to_string()),
            likes: raw.like_count.unwrap_or(0),
            retweets: raw.retweet_count.unwrap_or(0),
            replies: raw.reply_count.unwrap_or(0),
            // Raw order preserved
            media: raw
                .media
                .unwrap_or_default()
                .into_iter()
                .map(MediaItem::from)
                .collect(),
        }
    }
}

/// A user profile as served by the gateway.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub description: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub tweets: u64,
    pub verified: bool,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "profileImage")]
    pub profile_image: Option<String>,
    #[serde(rename = "bannerImage")]
    pub banner_image: Option<String>,
    pub location: Option<String>,
}

impl From<RawUser> for UserProfile {
    fn from(raw: RawUser) -> Self {
        Self {
            id: raw.id,
            username: raw.user_name.unwrap_or_else(|| "unknown".to_string()),
            display_name: raw.full_name.unwrap_or_default(),
            description: raw.description,
            followers: raw.followers_count.unwrap_or(0),
            following: raw.following_count.unwrap_or(0),
            tweets: raw.tweets_count.unwrap_or(0),
            verified: raw.is_verified.unwrap_or(false),
            created_at: raw.created_at.unwrap_or_default(),
            profile_image: raw.profile_image,
            banner_image: raw.banner_image,
            location: raw.location,
        }
    }
}
