use axum::Json;
use utoipa::OpenApi;

use crate::handlers::{health, healthdata, insurance};

/// OpenAPI document for the Klinik Engine API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Klinik Engine API",
        description = "Insurance and national health-data integration endpoints for the clinic UI"
    ),
    paths(
        health::health_check,
        health::version_info,
        insurance::check_eligibility,
        insurance::create_sep,
        insurance::get_sep,
        insurance::delete_sep,
        insurance::reference_list,
        healthdata::patient_lookup,
        healthdata::practitioner_lookup,
    ),
    components(schemas(
        health::HealthResponse,
        health::VersionResponse,
        insurance::EligibilityResponse,
        insurance::CreateSepBody,
        insurance::SepResponse,
        insurance::DeleteSepBody,
        insurance::DeleteSepResponse,
        healthdata::PatientLookupResponse,
        healthdata::PractitionerLookupResponse,
    )),
    tags(
        (name = "health", description = "Liveness and version probes"),
        (name = "insurance", description = "National insurance gateway"),
        (name = "healthdata", description = "National health-data platform")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
