use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::scenarios::Scenario;
use crate::state::AppState;

/// Builds the application router with all middleware and routes.
pub fn build_router(state: AppState) -> axum::Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    axum::Router::new()
        .route(Scenario::Home.path(), get(handlers::demos::home))
        .route(
            Scenario::Traditional.path(),
            get(handlers::demos::traditional),
        )
        .route(Scenario::Apex.path(), get(handlers::demos::apex))
        .route(Scenario::ApexBatch.path(), get(handlers::demos::apex_batch))
        .route(Scenario::Composite1.path(), get(handlers::demos::composite1))
        .route(Scenario::Composite2.path(), get(handlers::demos::composite2))
        .route(Scenario::Composite3.path(), get(handlers::demos::composite3))
        .route(Scenario::Tree.path(), get(handlers::demos::tree))
        .route("/health/live", get(handlers::health::liveness))
        .nest_service("/public", static_files)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn request_id_middleware(
    request: axum::extract::Request,
    next: middleware::Next,
) -> axum::response::Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    tracing::Span::current().record("request_id", request_id.as_str());
    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}
