//! Twitter Gateway API module
//! REST façade over the upstream Twitter client.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;
pub mod validate;

pub use handlers::AppState;
pub use routes::create_router;
