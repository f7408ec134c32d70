//! Chatbot ingestion endpoint.
//!
//! The chatbot channel posts appointment records here in its own field
//! convention. Rows are stored as received (no tenant resolution beyond
//! what the payload carries) and picked up by the tenant listing through
//! the reconciler. `source` defaults to `whatsapp` when the payload omits
//! it.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::{AppointmentRecord, RecordSource, UnifiedRecord};
use crate::normalize::{coerce_price, normalize_appointment};

#[derive(Debug, Deserialize)]
pub struct WebhookAppointment {
    #[serde(rename = "clinicId")]
    pub clinic_id: Option<String>,
    pub clinic_name: Option<String>,
    pub patient_name: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub service: Option<String>,
    pub price: Option<serde_json::Value>,
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
}

/// `POST /api/webhook/appointments`
pub async fn ingest(
    State(ctx): State<ApiContext>,
    Json(payload): Json<WebhookAppointment>,
) -> Result<Json<UnifiedRecord>, ApiError> {
    let conn = ctx.open_db()?;

    let record = AppointmentRecord {
        id: Uuid::new_v4().to_string(),
        clinic_id: payload.clinic_id,
        clinic_name: payload.clinic_name,
        patient_name: payload.patient_name,
        name: payload.name,
        phone: payload.phone,
        email: payload.email,
        service: payload.service,
        price: payload.price.as_ref().map(|v| coerce_price(Some(v))),
        appointment_date: payload.appointment_date,
        appointment_time: payload.appointment_time,
        date: payload.date,
        time: payload.time,
        status: payload.status,
        source: Some(
            payload
                .source
                .unwrap_or_else(|| RecordSource::Whatsapp.as_str().to_string()),
        ),
        created_at: Some(Utc::now().to_rfc3339()),
    };

    db::appointments::insert_appointment(&conn, &record)?;
    tracing::info!(record_id = %record.id, "webhook appointment stored");

    Ok(Json(normalize_appointment(&record, "")))
}
