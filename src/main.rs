//! Folio - portfolio panel service
//!
//! Serves the interaction state of a single-page portfolio: sidebar
//! navigation, a chat panel backed by a canned reply simulator, project
//! filters, an experience timeline, fun facts, a reviews carousel and a
//! simulated contact form. Display surfaces fetch JSON views and post actions.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod conversation;
mod core;
mod providers;
mod routes;

use crate::config::Config;
use crate::core::SessionRegistry;
use crate::providers::CannedReplies;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionRegistry>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let content = Arc::new(config.load_content()?);
    match &config.content_path {
        Some(path) => tracing::info!("📄 Loaded content from {}", path.display()),
        None => tracing::info!("📄 Using built-in content"),
    }

    let replies = Arc::new(CannedReplies::from_content(&content.chat));
    tracing::info!(
        "💬 {} canned replies, {}-{}ms latency",
        replies.replies().len(),
        content.chat.reply_delay_min_ms,
        content.chat.reply_delay_max_ms
    );

    let state = AppState {
        sessions: Arc::new(SessionRegistry::new(content, replies)),
    };

    let app = Router::new()
        .merge(routes::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("🗂️  Folio API running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
