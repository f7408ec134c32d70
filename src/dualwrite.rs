//! Write coordination across the two record collections.
//!
//! Every dashboard write has a primary step against the record's origin
//! collection and a best-effort secondary step against the other one, so
//! both stay independently readable for reconciliation. Only the primary
//! step decides success: a failed secondary is logged and swallowed. There
//! is deliberately no transaction spanning the two steps; wrapping them in
//! one would change the observable availability behavior, not just the
//! consistency.

use chrono::Utc;
use rusqlite::Connection;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::config::ClinicConfig;
use crate::db;
use crate::db::StoreError;
use crate::models::{AppointmentRecord, PatientRecord, RecordSource, UnifiedRecord};
use crate::normalize::{coerce_price, normalize_appointment, normalize_patient};

/// Fields accepted by the create and update endpoints. All optional;
/// `price` stays a raw JSON value because dashboard revisions send it as
/// either a number or a numeric string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordInput {
    #[serde(rename = "clinicId")]
    pub clinic_id: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub service: Option<String>,
    pub price: Option<serde_json::Value>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
}

impl RecordInput {
    fn price_value(&self) -> Option<f64> {
        self.price.as_ref().map(|v| coerce_price(Some(v)))
    }
}

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("Clinic ID required")]
    MissingClinicId,

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Coordinates dual writes. Carries the clinic display name stamped onto
/// appointment copies, injected once at construction.
pub struct Coordinator {
    clinic_name: String,
}

impl Coordinator {
    pub fn new(config: &ClinicConfig) -> Self {
        Self {
            clinic_name: config.clinic_name.clone(),
        }
    }

    /// Create a record. The patient insert is the primary write; the
    /// appointment copy is attempted afterwards and its failure never
    /// fails the call.
    pub fn create_record(
        &self,
        conn: &Connection,
        input: &RecordInput,
    ) -> Result<UnifiedRecord, CoordinatorError> {
        let clinic_id = input
            .clinic_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(CoordinatorError::MissingClinicId)?;

        let patient = PatientRecord {
            id: Uuid::new_v4().to_string(),
            clinic_id: clinic_id.to_string(),
            name: input.name.clone(),
            phone: input.phone.clone(),
            email: input.email.clone(),
            service: input.service.clone(),
            price: input.price_value(),
            date: input.date.clone(),
            time: input.time.clone(),
            status: input.status.clone(),
        };

        db::patients::insert_patient(conn, &patient)?;

        let copy = self.appointment_copy(&patient);
        if let Err(err) = db::appointments::insert_appointment(conn, &copy) {
            warn!(patient_id = %patient.id, %err, "appointment copy write failed");
        }

        Ok(normalize_patient(&patient))
    }

    /// Update a record by id in whichever collection holds it, then push
    /// the same changes to any records sharing its phone number in the
    /// other collection. A missing or failing pair is non-fatal.
    pub fn update_record(
        &self,
        conn: &Connection,
        id: &str,
        input: &RecordInput,
    ) -> Result<UnifiedRecord, CoordinatorError> {
        if let Some(mut patient) = db::patients::get_patient(conn, id)? {
            apply_to_patient(&mut patient, input);
            db::patients::update_patient(conn, &patient)?;
            propagate_to_appointments(conn, &patient, input);
            return Ok(normalize_patient(&patient));
        }

        if let Some(mut appointment) = db::appointments::get_appointment(conn, id)? {
            apply_to_appointment(&mut appointment, input);
            db::appointments::update_appointment(conn, &appointment)?;
            propagate_to_patients(conn, &appointment, input);
            return Ok(normalize_appointment(&appointment, ""));
        }

        Err(CoordinatorError::NotFound(id.to_string()))
    }

    /// Delete a record by id from its origin collection, then best-effort
    /// delete its same-phone pairs from the other collection.
    pub fn delete_record(&self, conn: &Connection, id: &str) -> Result<(), CoordinatorError> {
        if let Some(patient) = db::patients::get_patient(conn, id)? {
            db::patients::delete_patient(conn, id)?;
            if let Some(phone) = non_empty(&patient.phone) {
                if let Err(err) = db::appointments::delete_appointments_by_phone(conn, phone) {
                    warn!(patient_id = %id, %err, "appointment cascade delete failed");
                }
            }
            return Ok(());
        }

        if let Some(appointment) = db::appointments::get_appointment(conn, id)? {
            db::appointments::delete_appointment(conn, id)?;
            if let Some(phone) = non_empty(&appointment.phone) {
                if let Err(err) = db::patients::delete_patients_by_phone(conn, phone) {
                    warn!(appointment_id = %id, %err, "patient cascade delete failed");
                }
            }
            return Ok(());
        }

        Err(CoordinatorError::NotFound(id.to_string()))
    }

    /// Field-translated copy of a patient for the shared collection. Both
    /// naming conventions are populated so any downstream consumer finds
    /// the fields it expects.
    fn appointment_copy(&self, patient: &PatientRecord) -> AppointmentRecord {
        AppointmentRecord {
            id: Uuid::new_v4().to_string(),
            clinic_id: Some(patient.clinic_id.clone()),
            clinic_name: Some(self.clinic_name.clone()),
            patient_name: patient.name.clone(),
            name: patient.name.clone(),
            phone: patient.phone.clone(),
            email: patient.email.clone(),
            service: patient.service.clone(),
            price: patient.price,
            appointment_date: patient.date.clone(),
            appointment_time: patient.time.clone(),
            date: patient.date.clone(),
            time: patient.time.clone(),
            status: patient.status.clone(),
            source: Some(RecordSource::Dashboard.as_str().to_string()),
            created_at: Some(Utc::now().to_rfc3339()),
        }
    }
}

fn propagate_to_appointments(conn: &Connection, patient: &PatientRecord, input: &RecordInput) {
    let Some(phone) = non_empty(&patient.phone) else {
        return;
    };
    let pairs = match db::appointments::list_appointments_by_phone(conn, phone) {
        Ok(pairs) => pairs,
        Err(err) => {
            warn!(patient_id = %patient.id, %err, "paired appointment lookup failed");
            return;
        }
    };
    for mut pair in pairs {
        apply_to_appointment(&mut pair, input);
        if let Err(err) = db::appointments::update_appointment(conn, &pair) {
            warn!(appointment_id = %pair.id, %err, "paired appointment update failed");
        }
    }
}

fn propagate_to_patients(conn: &Connection, appointment: &AppointmentRecord, input: &RecordInput) {
    let Some(phone) = non_empty(&appointment.phone) else {
        return;
    };
    let pairs = match db::patients::list_patients_by_phone(conn, phone) {
        Ok(pairs) => pairs,
        Err(err) => {
            warn!(appointment_id = %appointment.id, %err, "paired patient lookup failed");
            return;
        }
    };
    for mut pair in pairs {
        apply_to_patient(&mut pair, input);
        if let Err(err) = db::patients::update_patient(conn, &pair) {
            warn!(patient_id = %pair.id, %err, "paired patient update failed");
        }
    }
}

/// Overwrite only the fields the input carries, leaving the rest as
/// stored. The tenant key never changes on update.
fn apply_to_patient(patient: &mut PatientRecord, input: &RecordInput) {
    if input.name.is_some() {
        patient.name = input.name.clone();
    }
    if input.phone.is_some() {
        patient.phone = input.phone.clone();
    }
    if input.email.is_some() {
        patient.email = input.email.clone();
    }
    if input.service.is_some() {
        patient.service = input.service.clone();
    }
    if let Some(price) = input.price_value() {
        patient.price = Some(price);
    }
    if input.date.is_some() {
        patient.date = input.date.clone();
    }
    if input.time.is_some() {
        patient.time = input.time.clone();
    }
    if input.status.is_some() {
        patient.status = input.status.clone();
    }
}

/// Same as `apply_to_patient`, writing each changed field through both
/// naming conventions so the row stays readable under either.
fn apply_to_appointment(appointment: &mut AppointmentRecord, input: &RecordInput) {
    if input.name.is_some() {
        appointment.name = input.name.clone();
        appointment.patient_name = input.name.clone();
    }
    if input.phone.is_some() {
        appointment.phone = input.phone.clone();
    }
    if input.email.is_some() {
        appointment.email = input.email.clone();
    }
    if input.service.is_some() {
        appointment.service = input.service.clone();
    }
    if let Some(price) = input.price_value() {
        appointment.price = Some(price);
    }
    if input.date.is_some() {
        appointment.date = input.date.clone();
        appointment.appointment_date = input.date.clone();
    }
    if input.time.is_some() {
        appointment.time = input.time.clone();
        appointment.appointment_time = input.time.clone();
    }
    if input.status.is_some() {
        appointment.status = input.status.clone();
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
