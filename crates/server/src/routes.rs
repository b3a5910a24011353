use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::address::{repository::JsonAddressRepository, service::AddressService};

pub mod addresses;

/// Shared application state: the address service in front of its repository.
#[derive(Clone)]
pub struct AppState {
    pub addresses: Arc<AddressService<JsonAddressRepository>>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: static frontend, health probe, and the
/// address CRUD API.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let static_dir = ServeDir::new("frontend").fallback(ServeFile::new("frontend/index.html"));

    // Public routes (static + health)
    let public = Router::new()
        .nest_service("/", static_dir)
        .route("/health", get(health));

    // Address API routes
    let api = Router::new()
        .route(
            "/api/addresses",
            get(addresses::list_addresses).post(addresses::save_address),
        )
        .route("/api/addresses/:id", delete(addresses::delete_address))
        .with_state(state);

    // Compose
    public
        .merge(api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
