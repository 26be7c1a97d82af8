use crate::AppState;
use axum::{extract::DefaultBodyLimit, routing::post, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the application router with its middleware stack.
pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config.server.max_body_bytes;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(crate::api::handlers::chat::chat))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .with_state(state)
}
