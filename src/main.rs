//! Twitter Gateway API Server
//!
//! REST façade over a rettiwt-compatible Twitter client.
//!
//! Usage:
//!   cargo run --bin tweet_api
//!
//! Environment:
//!   TWITTER_API_KEY - Upstream client credential
//!   BEARER_TOKEN    - Shared secret for mutating routes
//!   HOST            - Listen host (default: 0.0.0.0)
//!   PORT            - Listen port (default: 3000)
//!   APP_ENV         - development | production (default: development)
//!   TWITTER_API_URL - Upstream base URL override

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use tweet_gateway::api::{create_router, AppState};
use tweet_gateway::config::{init_environment, AppConfig};
use tweet_gateway::providers::RettiwtClient;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    // Top-level fault boundary: a panic means possibly-corrupt state, so
    // log and exit; the supervisor restarts the process.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!("Fatal: unrecovered panic: {info}");
        default_hook(info);
        std::process::exit(1);
    }));

    let config = AppConfig::from_env();
    init_environment(config.environment);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let auth_mode = config.auth_mode();
    let environment = config.environment;

    let twitter = Arc::new(RettiwtClient::new(
        config.upstream_url.clone(),
        config.api_key.clone(),
    ));
    let state = Arc::new(AppState::new(config, twitter));
    let app = create_router(state);

    info!("Twitter Gateway API starting on http://{}", addr);
    info!("Authentication: {}", auth_mode);
    info!("Environment: {}", environment.as_str());
    info!("");
    info!("Endpoints:");
    info!("  GET  /                    - Health check and API information");
    info!("  GET  /health              - Service health");
    info!("  GET  /user/:username      - Get user tweets");
    info!("  GET  /search?q=keyword    - Search tweets");
    info!("  GET  /tweet/:id           - Get specific tweet");
    info!("  GET  /user/:username/info - Get user information");
    info!("  GET  /advanced-search     - Advanced search with filters");
    info!("  POST /tweet               - Post new tweet (auth)");
    info!("  POST /upload              - Upload media (auth)");
    info!("  POST /tweet/:id/reply     - Reply to tweet (auth)");
    info!("  DEL  /tweet/:id           - Delete tweet (auth)");
    info!("  POST/DEL /tweet/:id/like  - Like / unlike (auth)");
    info!("  POST/DEL /tweet/:id/retweet - Retweet / unretweet (auth)");
    info!("");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Twitter Gateway API shutdown complete");

    Ok(())
}
