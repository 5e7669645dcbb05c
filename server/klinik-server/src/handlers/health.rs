use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::KlinikServer;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall system health status
    #[schema(example = "healthy")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    pub timestamp: String,
    /// API version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Individual service health checks
    pub checks: HashMap<String, String>,
}

/// Version information response
#[derive(Debug, Serialize, ToSchema)]
pub struct VersionResponse {
    #[schema(example = "Klinik Engine")]
    pub name: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Enabled integrations
    pub integrations: Vec<String>,
}

/// Health check handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(server): State<KlinikServer>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    let mut checks = HashMap::new();

    let database = match sqlx::query("SELECT 1").execute(&server.db_pool).await {
        Ok(_) => "healthy",
        Err(_) => "unreachable",
    };
    checks.insert("database".to_string(), database.to_string());

    checks.insert(
        "insurance_gateway".to_string(),
        if server.insurance.is_some() {
            "enabled"
        } else {
            "disabled"
        }
        .to_string(),
    );
    checks.insert(
        "healthdata_gateway".to_string(),
        if server.healthdata.is_some() {
            "enabled"
        } else {
            "disabled"
        }
        .to_string(),
    );

    let status = if database == "healthy" { "healthy" } else { "degraded" };

    let response = HealthResponse {
        status: status.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    };

    Ok(Json(api_success(response)))
}

/// Version information handler
#[utoipa::path(
    get,
    path = "/version",
    tag = "health",
    responses(
        (status = 200, description = "Version information retrieved successfully", body = VersionResponse)
    )
)]
pub async fn version_info(
    State(server): State<KlinikServer>,
) -> Result<Json<ApiResponse<VersionResponse>>, ApiError> {
    let mut integrations = Vec::new();
    if server.insurance.is_some() {
        integrations.push("insurance-gateway".to_string());
    }
    if server.healthdata.is_some() {
        integrations.push("healthdata-gateway".to_string());
    }

    let response = VersionResponse {
        name: server.config.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        integrations,
    };

    Ok(Json(api_success(response)))
}
