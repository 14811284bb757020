//! Twitter Gateway Library
//!
//! Thin REST façade over a rettiwt-compatible Twitter client:
//! - Bearer-token gating on mutating routes
//! - Per-route request validation
//! - Projection of raw upstream records into stable JSON shapes
//! - Uniform `{success, ...}` envelopes, success and failure alike

pub mod api;
pub mod config;
pub mod models;
pub mod providers;

pub use api::{create_router, AppState};
pub use config::{current_environment, init_environment, AppConfig, Environment};
pub use models::{AppError, AppResult, ErrorCode, MediaItem, Tweet, UserProfile};
pub use providers::{PostOptions, RettiwtClient, SearchCriteria, TwitterClient};
