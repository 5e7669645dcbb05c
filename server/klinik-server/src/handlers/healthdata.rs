use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use healthdata_gateway::{PatientRecord, PractitionerRecord};

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::KlinikServer;

/// NIK lookup query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct NikParams {
    /// National identity number of the person to look up.
    pub nik: String,
}

/// Patient lookup response
#[derive(Debug, Serialize, ToSchema)]
pub struct PatientLookupResponse {
    pub found: bool,
    #[schema(value_type = Object)]
    pub patient: Option<PatientRecord>,
}

/// Practitioner lookup response
#[derive(Debug, Serialize, ToSchema)]
pub struct PractitionerLookupResponse {
    pub found: bool,
    #[schema(value_type = Object)]
    pub practitioner: Option<PractitionerRecord>,
}

/// Patient lookup on the national platform
#[utoipa::path(
    get,
    path = "/api/v1/healthdata/patient",
    tag = "healthdata",
    params(NikParams),
    responses(
        (status = 200, description = "Lookup completed", body = PatientLookupResponse),
        (status = 502, description = "Platform unreachable")
    )
)]
pub async fn patient_lookup(
    State(server): State<KlinikServer>,
    Query(params): Query<NikParams>,
) -> Result<Json<ApiResponse<PatientLookupResponse>>, ApiError> {
    let client = server.healthdata()?;
    let patient = client.patient_by_nik(&params.nik).await?;

    Ok(Json(api_success(PatientLookupResponse {
        found: patient.is_some(),
        patient,
    })))
}

/// Practitioner lookup on the national platform
#[utoipa::path(
    get,
    path = "/api/v1/healthdata/practitioner",
    tag = "healthdata",
    params(NikParams),
    responses(
        (status = 200, description = "Lookup completed", body = PractitionerLookupResponse),
        (status = 502, description = "Platform unreachable")
    )
)]
pub async fn practitioner_lookup(
    State(server): State<KlinikServer>,
    Query(params): Query<NikParams>,
) -> Result<Json<ApiResponse<PractitionerLookupResponse>>, ApiError> {
    let client = server.healthdata()?;
    let practitioner = client.practitioner_by_nik(&params.nik).await?;

    Ok(Json(api_success(PractitionerLookupResponse {
        found: practitioner.is_some(),
        practitioner,
    })))
}
