use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::review::ReviewService;

pub mod handlers;
pub mod render;

#[derive(Clone)]
pub struct AppState {
    pub review: Arc<ReviewService>,
    pub model_name: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/review", post(handlers::review))
        .route("/api/review", post(handlers::api_review))
}
