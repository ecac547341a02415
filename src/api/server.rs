use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::routes;
use crate::api::state::AppState;
use crate::core::AppConfig;
use crate::openai::OpenAiProvider;

pub fn app(shared_state: Arc<AppState>) -> Router {
    let cors = shared_state.origins.cors_layer();

    Router::new()
        .merge(routes::router(Arc::clone(&shared_state)))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

// Run the server
pub async fn serve(host: String, port: String, config: AppConfig) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format! {
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                }
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set, every chat request will fail");
    }

    let provider = Arc::new(OpenAiProvider::new(&config));
    let app_state = AppState::new(&config, provider);
    let app = app(Arc::new(app_state));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;

    tracing::info!("Server running. Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
