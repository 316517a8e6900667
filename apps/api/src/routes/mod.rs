pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::generation::handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation
        .route("/api/v1/resumes/generate", post(handlers::handle_generate))
        .route("/api/v1/resumes/tailor", post(handlers::handle_tailor))
        // Schema
        .route("/api/v1/resumes/normalize", post(handlers::handle_normalize))
        .route("/api/v1/resumes/validate", post(handlers::handle_validate))
        // Render
        .route(
            "/api/v1/resumes/render/pdf",
            post(handlers::handle_render_pdf),
        )
        .route(
            "/api/v1/resumes/render/html",
            post(handlers::handle_render_html),
        )
        .fallback(not_found)
        .with_state(state)
}
