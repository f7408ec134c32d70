//! Clinic config endpoint consumed by the dashboard shell.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;

#[derive(Serialize)]
pub struct ClinicConfigResponse {
    #[serde(rename = "clinicId")]
    pub clinic_id: String,
    pub username: String,
    pub name: String,
}

/// `GET /api/clinic/config/:clinic_id`
pub async fn config(
    State(ctx): State<ApiContext>,
    Path(clinic_id): Path<String>,
) -> Result<Json<ClinicConfigResponse>, ApiError> {
    let conn = ctx.open_db()?;
    let clinic = db::clinics::get_clinic(&conn, &clinic_id)?
        .ok_or_else(|| ApiError::NotFound("Clinic not found".into()))?;

    Ok(Json(ClinicConfigResponse {
        clinic_id: clinic.clinic_id,
        username: clinic.username,
        name: clinic.name.unwrap_or_default(),
    }))
}
