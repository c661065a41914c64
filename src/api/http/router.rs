// src/api/http/router.rs
// HTTP router composition for the REST API

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::{
    chat::{list_messages, send_message},
    health::health_check,
    training::{learn_from_url, list_training, rate_response, train},
};
use crate::state::AppState;

/// Full application router: `/health` plus everything under `/api`.
pub fn http_router(app_state: Arc<AppState>) -> Router {
    let api: Router<Arc<AppState>> = Router::new()
        // Chat
        .route("/chat/messages", get(list_messages).post(send_message))
        // Training
        .route("/training", get(list_training).post(train))
        .route("/training/learn", post(learn_from_url))
        .route("/training/{id}/rating", post(rate_response));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}
