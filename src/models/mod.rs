//! Data models: error taxonomy and projected response entities.

pub mod errors;
pub mod types;

pub use errors::{AppError, AppResult, ErrorCode};
pub use types::{MediaItem, Tweet, UserProfile};
