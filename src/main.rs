use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod gemini;
mod prompts;
mod review;
mod web;

use config::AppConfig;
use gemini::client::GeminiClient;
use gemini::types::GenerationConfig;
use review::ReviewService;
use web::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------
    // Logging
    // -----------------------------
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    println!("🚀 Starting AI code reviewer...");

    // -----------------------------
    // Shared state / Dependencies
    // -----------------------------
    let config = AppConfig::from_env()?;
    let model = Arc::new(GeminiClient::new(&config)?);
    let review = Arc::new(ReviewService::new(model, GenerationConfig::default()));

    let state = AppState {
        review,
        model_name: config.model.clone(),
    };

    // -----------------------------
    // Routers
    // -----------------------------
    let app = Router::new()
        .merge(web::router())
        // CORS for frontend
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state);

    let addr = config.bind_addr.clone();

    println!("🌐 HTTP listening on http://{addr}");
    println!("🧑‍💻 Review UI at http://{addr}/");
    println!("🛠 JSON API at http://{addr}/api/review");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
