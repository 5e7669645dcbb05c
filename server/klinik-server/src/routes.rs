use axum::{
    routing::get,
    Router,
};

use crate::{
    handlers::{health, healthdata, insurance},
    openapi,
    server::KlinikServer,
};

/// Route path constants, grouped per handler module.
pub mod paths {
    pub mod health {
        pub const HEALTH: &str = "/health";
        pub const VERSION: &str = "/version";
    }

    pub mod insurance {
        pub const ELIGIBILITY: &str = "/insurance/eligibility/:card_number/date/:service_date";
        pub const SEP: &str = "/insurance/sep";
        pub const SEP_BY_NUMBER: &str = "/insurance/sep/:sep_number";
        pub const REFERENCE: &str = "/insurance/reference/:kind";
    }

    pub mod healthdata {
        pub const PATIENT: &str = "/healthdata/patient";
        pub const PRACTITIONER: &str = "/healthdata/practitioner";
    }
}

/// Create health check routes
pub fn health_routes() -> Router<KlinikServer> {
    Router::new()
        .route(paths::health::HEALTH, get(health::health_check))
        .route(paths::health::VERSION, get(health::version_info))
}

/// Create insurance gateway routes
pub fn insurance_routes() -> Router<KlinikServer> {
    Router::new()
        .route(
            paths::insurance::ELIGIBILITY,
            get(insurance::check_eligibility),
        )
        .route(
            paths::insurance::SEP,
            axum::routing::post(insurance::create_sep).delete(insurance::delete_sep),
        )
        .route(paths::insurance::SEP_BY_NUMBER, get(insurance::get_sep))
        .route(paths::insurance::REFERENCE, get(insurance::reference_list))
}

/// Create health-data platform routes
pub fn healthdata_routes() -> Router<KlinikServer> {
    Router::new()
        .route(paths::healthdata::PATIENT, get(healthdata::patient_lookup))
        .route(
            paths::healthdata::PRACTITIONER,
            get(healthdata::practitioner_lookup),
        )
}

/// Assemble every route group under the API prefix.
pub fn create_routes() -> Router<KlinikServer> {
    Router::new()
        .merge(health_routes())
        .nest("/api/v1", insurance_routes().merge(healthdata_routes()))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
}
