//! API route configuration

use std::sync::Arc;

use axum::{
    handler::Handler,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{self, AppState};
use super::middleware::{logging_middleware, require_bearer};

/// Create the API router with all routes and middleware.
///
/// Mutating handlers are individually wrapped with the bearer gate;
/// read-only handlers are reachable without credentials.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth = middleware::from_fn_with_state(state.clone(), require_bearer);

    Router::new()
        // Health & info
        .route("/", get(handlers::service_info))
        .route("/health", get(handlers::health_check))
        // Read endpoints
        .route("/user/:username", get(handlers::user_tweets))
        .route("/user/:username/info", get(handlers::user_info))
        .route("/search", get(handlers::search_tweets))
        .route("/advanced-search", get(handlers::advanced_search))
        .route("/trending", get(handlers::trending))
        // Mutating endpoints, bearer-gated
        .route("/tweet", post(handlers::post_tweet.layer(auth.clone())))
        .route("/upload", post(handlers::upload_media.layer(auth.clone())))
        .route(
            "/tweet/:id",
            get(handlers::tweet_by_id).delete(handlers::delete_tweet.layer(auth.clone())),
        )
        .route(
            "/tweet/:id/reply",
            post(handlers::reply_to_tweet.layer(auth.clone())),
        )
        .route(
            "/tweet/:id/like",
            post(handlers::like_tweet.layer(auth.clone()))
                .delete(handlers::unlike_tweet.layer(auth.clone())),
        )
        .route(
            "/tweet/:id/retweet",
            post(handlers::retweet.layer(auth.clone()))
                .delete(handlers::unretweet.layer(auth)),
        )
        .fallback(handlers::not_found)
        .with_state(state)
        // Middleware (order matters - bottom runs first)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}
