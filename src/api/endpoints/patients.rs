//! Record CRUD endpoints.
//!
//! - `GET /api/patients?clinicId=X` — reconciled tenant listing
//! - `POST /api/patients` — create with dual write
//! - `PUT /api/patients/:id` — update with paired propagation
//! - `DELETE /api/patients/:id` — delete with paired cascade

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, MessageResponse};
use crate::dualwrite::RecordInput;
use crate::models::UnifiedRecord;
use crate::reconcile;

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(rename = "clinicId")]
    pub clinic_id: Option<String>,
}

/// `GET /api/patients` — reconciled records for one tenant, newest first.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<UnifiedRecord>>, ApiError> {
    let conn = ctx.open_db()?;
    let clinic_id = query.clinic_id.unwrap_or_default();
    let records = reconcile::list_records(&conn, &clinic_id)?;
    Ok(Json(records))
}

/// `POST /api/patients` — create a record.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(input): Json<RecordInput>,
) -> Result<Json<UnifiedRecord>, ApiError> {
    let conn = ctx.open_db()?;
    let created = ctx.coordinator.create_record(&conn, &input)?;
    tracing::info!(record_id = %created.id, clinic_id = %created.clinic_id, "record created");
    Ok(Json(created))
}

/// `PUT /api/patients/:id` — update a record in its origin collection.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(input): Json<RecordInput>,
) -> Result<Json<UnifiedRecord>, ApiError> {
    let conn = ctx.open_db()?;
    let updated = ctx.coordinator.update_record(&conn, &id, &input)?;
    Ok(Json(updated))
}

/// `DELETE /api/patients/:id` — delete a record and its phone pairs.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let conn = ctx.open_db()?;
    ctx.coordinator.delete_record(&conn, &id)?;
    tracing::info!(record_id = %id, "record deleted");
    Ok(Json(MessageResponse {
        message: "Deleted".into(),
    }))
}
