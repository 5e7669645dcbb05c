//! Klinik Server - clinic integration API
//!
//! This library provides the HTTP boundary between the clinic UI and the
//! national integrations: insurance eligibility and SEP issuance, and
//! patient/practitioner lookup on the national health-data platform. The
//! hosted database remains the system of record; the only local write is
//! the SEP number stored against an appointment.

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod storage;

// Re-export commonly used types
pub use error::*;
pub use server::KlinikServer;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the main application router with all routes and middleware
pub fn create_app(server: KlinikServer) -> Router {
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(server)
}
