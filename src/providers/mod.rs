//! External collaborators.

pub mod twitter;

pub use twitter::{PostOptions, RettiwtClient, SearchCriteria, TwitterClient};
