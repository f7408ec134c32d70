//! Login endpoint.
//!
//! Clear-text credential match, by design for this system: hardening the
//! login path is explicitly out of scope. The session itself lives on the
//! client side.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    #[serde(rename = "clinicId")]
    pub clinic_id: String,
    pub name: String,
}

/// `POST /api/auth/login`
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let conn = ctx.open_db()?;
    let clinic = db::clinics::find_by_credentials(&conn, &req.username, &req.password)?
        .ok_or(ApiError::Unauthorized)?;

    tracing::info!(clinic_id = %clinic.clinic_id, "login");
    Ok(Json(LoginResponse {
        clinic_id: clinic.clinic_id,
        name: clinic.name.unwrap_or_default(),
    }))
}
