use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use insurance_gateway::{Peserta, ReferenceItem, ReferenceKind, Sep, SepRequest};

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::KlinikServer;
use crate::storage;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Eligibility lookup response
#[derive(Debug, Serialize, ToSchema)]
pub struct EligibilityResponse {
    /// True whenever the gateway answered with its success code.
    pub eligible: bool,
    /// Participant detail as returned by the gateway.
    #[schema(value_type = Object)]
    pub peserta: Peserta,
}

/// SEP issuance request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSepBody {
    /// Local appointment the issued SEP number is stored against.
    pub appointment_id: Uuid,
    /// Full SEP payload forwarded to the gateway.
    #[schema(value_type = Object)]
    pub sep: SepRequest,
}

/// SEP issuance / lookup response
#[derive(Debug, Serialize, ToSchema)]
pub struct SepResponse {
    /// True when the appointment already held a SEP and no new one was issued.
    pub already_issued: bool,
    #[schema(value_type = Object)]
    pub sep: Sep,
}

/// SEP void request
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteSepBody {
    pub appointment_id: Uuid,
    pub sep_number: String,
    /// Operator username, recorded by the gateway for audit.
    pub user: String,
}

/// SEP void response
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteSepResponse {
    /// The gateway's own confirmation message.
    pub message: String,
}

/// Reference lookup query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ReferenceParams {
    /// Search keyword (polyclinic, diagnosis and facility lookups).
    pub keyword: Option<String>,
    /// Service date (attending-physician lookup).
    pub service_date: Option<NaiveDate>,
}

fn reference_kind_from(kind: &str, params: ReferenceParams) -> Result<ReferenceKind, ApiError> {
    let keyword = |params: ReferenceParams| {
        params
            .keyword
            .filter(|keyword| !keyword.trim().is_empty())
            .ok_or_else(|| ApiError::bad_request("keyword is required for this reference kind"))
    };

    match kind {
        "poli" => Ok(ReferenceKind::Polyclinic {
            keyword: keyword(params)?,
        }),
        "diagnosa" => Ok(ReferenceKind::Diagnosis {
            keyword: keyword(params)?,
        }),
        "faskes" => Ok(ReferenceKind::Facility {
            keyword: keyword(params)?,
        }),
        "dokter" => {
            let service_date = params.service_date.ok_or_else(|| {
                ApiError::bad_request("service_date is required for the physician lookup")
            })?;
            Ok(ReferenceKind::AttendingPhysician { service_date })
        }
        other => Err(ApiError::bad_request(format!(
            "unknown reference kind: {other}"
        ))),
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// Participant eligibility lookup
#[utoipa::path(
    get,
    path = "/api/v1/insurance/eligibility/{card_number}/date/{service_date}",
    tag = "insurance",
    params(
        ("card_number" = String, Path, description = "Insurance card number"),
        ("service_date" = String, Path, description = "Service date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Participant is eligible", body = EligibilityResponse),
        (status = 422, description = "Gateway rejected the lookup"),
        (status = 502, description = "Gateway unreachable")
    )
)]
pub async fn check_eligibility(
    State(server): State<KlinikServer>,
    Path((card_number, service_date)): Path<(String, NaiveDate)>,
) -> Result<Json<ApiResponse<EligibilityResponse>>, ApiError> {
    let client = server.insurance()?;
    let peserta = client.check_eligibility(&card_number, service_date).await?;

    Ok(Json(api_success(EligibilityResponse {
        eligible: true,
        peserta,
    })))
}

/// Issue a SEP for an appointment
///
/// A SEP number is consumed at the insurer, so issuance is guarded: when the
/// appointment already stores a number, the existing SEP is returned with
/// `already_issued` set instead of asking the gateway for a second one.
#[utoipa::path(
    post,
    path = "/api/v1/insurance/sep",
    tag = "insurance",
    request_body = CreateSepBody,
    responses(
        (status = 200, description = "SEP issued or already present", body = SepResponse),
        (status = 404, description = "Appointment not found"),
        (status = 422, description = "Gateway rejected the request")
    )
)]
pub async fn create_sep(
    State(server): State<KlinikServer>,
    Json(body): Json<CreateSepBody>,
) -> Result<Json<ApiResponse<SepResponse>>, ApiError> {
    let client = server.insurance()?;

    if let Some(existing) = storage::sep_number_for_appointment(&server.db_pool, body.appointment_id).await? {
        info!(
            appointment_id = %body.appointment_id,
            no_sep = %existing,
            "appointment already has a SEP, returning it instead of re-issuing"
        );
        let sep = client.get_sep(&existing).await?;
        return Ok(Json(api_success(SepResponse {
            already_issued: true,
            sep,
        })));
    }

    let sep = client.create_sep(&body.sep).await?;
    storage::attach_sep_number(&server.db_pool, body.appointment_id, &sep.no_sep).await?;

    Ok(Json(api_success(SepResponse {
        already_issued: false,
        sep,
    })))
}

/// Fetch a SEP by number
#[utoipa::path(
    get,
    path = "/api/v1/insurance/sep/{sep_number}",
    tag = "insurance",
    params(("sep_number" = String, Path, description = "Issued SEP number")),
    responses(
        (status = 200, description = "SEP detail", body = SepResponse),
        (status = 422, description = "Gateway rejected the lookup")
    )
)]
pub async fn get_sep(
    State(server): State<KlinikServer>,
    Path(sep_number): Path<String>,
) -> Result<Json<ApiResponse<SepResponse>>, ApiError> {
    let client = server.insurance()?;
    let sep = client.get_sep(&sep_number).await?;

    Ok(Json(api_success(SepResponse {
        already_issued: false,
        sep,
    })))
}

/// Void a SEP
///
/// Voids at the gateway first; only on success is the locally stored number
/// cleared from the appointment.
#[utoipa::path(
    delete,
    path = "/api/v1/insurance/sep",
    tag = "insurance",
    request_body = DeleteSepBody,
    responses(
        (status = 200, description = "SEP voided", body = DeleteSepResponse),
        (status = 404, description = "Appointment not found"),
        (status = 422, description = "Gateway rejected the void")
    )
)]
pub async fn delete_sep(
    State(server): State<KlinikServer>,
    Json(body): Json<DeleteSepBody>,
) -> Result<Json<ApiResponse<DeleteSepResponse>>, ApiError> {
    let client = server.insurance()?;

    let message = client.delete_sep(&body.sep_number, &body.user).await?;
    storage::clear_sep_number(&server.db_pool, body.appointment_id).await?;

    Ok(Json(api_success(DeleteSepResponse { message })))
}

/// Reference-table lookup
#[utoipa::path(
    get,
    path = "/api/v1/insurance/reference/{kind}",
    tag = "insurance",
    params(
        ("kind" = String, Path, description = "One of: poli, diagnosa, faskes, dokter"),
        ReferenceParams
    ),
    responses(
        (status = 200, description = "Reference items"),
        (status = 400, description = "Unknown kind or missing parameter")
    )
)]
pub async fn reference_list(
    State(server): State<KlinikServer>,
    Path(kind): Path<String>,
    Query(params): Query<ReferenceParams>,
) -> Result<Json<ApiResponse<Vec<ReferenceItem>>>, ApiError> {
    let client = server.insurance()?;
    let kind = reference_kind_from(&kind, params)?;
    let items = client.reference_list(kind).await?;

    Ok(Json(api_success(items)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(keyword: Option<&str>, service_date: Option<NaiveDate>) -> ReferenceParams {
        ReferenceParams {
            keyword: keyword.map(str::to_string),
            service_date,
        }
    }

    #[test]
    fn keyword_kinds_require_a_keyword() {
        assert!(reference_kind_from("poli", params(Some("mata"), None)).is_ok());
        assert!(reference_kind_from("diagnosa", params(None, None)).is_err());
        assert!(reference_kind_from("faskes", params(Some("  "), None)).is_err());
    }

    #[test]
    fn physician_lookup_requires_a_service_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert!(reference_kind_from("dokter", params(None, date)).is_ok());
        assert!(reference_kind_from("dokter", params(Some("x"), None)).is_err());
    }

    #[test]
    fn unknown_kind_is_a_bad_request() {
        let err = reference_kind_from("obat", params(Some("x"), None)).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }
}
