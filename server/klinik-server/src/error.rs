use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use healthdata_gateway::HealthDataError;
use insurance_gateway::GatewayError;

/// Uniform response envelope for every API endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

pub fn api_success<T>(data: T) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data: Some(data),
        error: None,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}

/// API failure carrying an HTTP status, a stable machine code, and the
/// message shown to the operator. Gateway messages pass through unchanged.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", message)
    }

    /// The operator explicitly disabled this integration; the request is
    /// valid but cannot be served.
    pub fn integration_disabled(which: &str) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "INTEGRATION_DISABLED",
            format!("{which} integration is disabled on this deployment"),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body: ApiResponse<()> = ApiResponse {
            success: false,
            data: None,
            error: Some(ApiErrorBody {
                code: self.code,
                message: self.message,
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            // Business rejection: the gateway's message goes to the operator verbatim.
            GatewayError::Domain { message, .. } => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "GATEWAY_REJECTED",
                message,
            ),
            GatewayError::Transport { .. } => {
                Self::new(StatusCode::BAD_GATEWAY, "GATEWAY_UNAVAILABLE", err.to_string())
            }
            GatewayError::Network(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "GATEWAY_UNREACHABLE", err.to_string())
            }
            GatewayError::Serialization(_) | GatewayError::Malformed(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "GATEWAY_MALFORMED", err.to_string())
            }
            GatewayError::Config(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "GATEWAY_MISCONFIGURED",
                err.to_string(),
            ),
        }
    }
}

impl From<HealthDataError> for ApiError {
    fn from(err: HealthDataError) -> Self {
        match err {
            HealthDataError::Auth(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "HEALTHDATA_AUTH", err.to_string())
            }
            HealthDataError::Transport { .. } | HealthDataError::Network(_) => Self::new(
                StatusCode::BAD_GATEWAY,
                "HEALTHDATA_UNAVAILABLE",
                err.to_string(),
            ),
            HealthDataError::Serialization(_) | HealthDataError::Malformed(_) => Self::new(
                StatusCode::BAD_GATEWAY,
                "HEALTHDATA_MALFORMED",
                err.to_string(),
            ),
            HealthDataError::Config(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "HEALTHDATA_MISCONFIGURED",
                err.to_string(),
            ),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "DATABASE",
            format!("database error: {err}"),
        )
    }
}
