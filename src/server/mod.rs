pub mod handlers;
mod types;

pub use types::*;

use crate::{
    Result,
    config::Config,
    llm::OpenAiClient,
    recommend::{Recommender, RecommenderSettings},
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Builds the application router. `max_upload_bytes` bounds the whole
/// request body, multipart framing included.
pub fn router(state: handlers::AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/recommendations", post(handlers::recommend))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let llm = OpenAiClient::new(config.llm.clone());
    info!("Using model {} at {}", llm.model(), config.llm.base_url);

    let recommender = Recommender::new(Arc::new(llm), RecommenderSettings::from_config(&config));

    let app_state = handlers::AppState {
        recommender: Arc::new(recommender),
    };

    let app = router(app_state, config.server.max_upload_bytes);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
