use super::handlers::{comments, moderation, profile, talks, unsubscribe};
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub fn build_router(state: AppState, allowed_origins: &str) -> Router {
    let cors = if allowed_origins == "*" {
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT])
            .allow_origin(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse::<HeaderValue>().ok())
            .collect();

        if origins.is_empty() {
            tracing::warn!("CORS config is invalid or empty, falling back to allow ANY.");
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT])
                .allow_origin(Any)
                .allow_headers(Any)
        } else {
            tracing::info!("CORS enabled for origins: {:?}", origins);
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT])
                .allow_origin(origins)
                .allow_headers(Any)
        }
    };

    Router::new()
        .route("/api/talks", get(talks::list_talks).post(talks::create_talk))
        .route("/api/talks/:id", get(talks::get_talk).put(talks::edit_talk))
        .route(
            "/api/talks/:id/comments",
            get(comments::list_comments).post(comments::post_comment),
        )
        .route("/api/users/:username", get(talks::get_user))
        .route("/api/users/:username/talks", get(talks::list_user_talks))
        .route("/api/comments/:id/approve", post(moderation::approve_comment))
        .route("/api/moderation", get(moderation::personal_queue))
        .route("/api/moderation/all", get(moderation::admin_queue))
        .route("/api/profile", get(profile::get_profile).put(profile::update_profile))
        .route("/api/unsubscribe/:token", get(unsubscribe::unsubscribe))
        .layer(cors)
        .with_state(state)
}
