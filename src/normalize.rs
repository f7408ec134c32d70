//! Normalization of the two stored record shapes into `UnifiedRecord`.
//!
//! Everything here is a pure, total mapping: a raw row of either shape
//! always normalizes, no matter which fields it is missing or which of the
//! two naming conventions it uses. Absent fields become empty strings or
//! the documented defaults (`price` 0, `status` "Pending"), never errors.
//!
//! When a row carries both naming conventions, the dashboard-convention
//! field wins; when only one is populated, whichever is present is used.
//! Empty strings count as absent, matching how the legacy producers wrote
//! their fallback chains.

use std::str::FromStr;

use serde_json::Value;

use crate::models::unified::DEFAULT_STATUS;
use crate::models::{AppointmentRecord, PatientRecord, RecordSource, UnifiedRecord};

/// A raw store row of either shape, for callers that normalize mixed
/// batches.
#[derive(Debug, Clone)]
pub enum RawRecord {
    Patient(PatientRecord),
    Appointment(AppointmentRecord),
}

pub fn normalize(raw: &RawRecord, fallback_clinic: &str) -> UnifiedRecord {
    match raw {
        RawRecord::Patient(p) => normalize_patient(p),
        RawRecord::Appointment(a) => normalize_appointment(a, fallback_clinic),
    }
}

/// Dashboard-authored rows already use the canonical field names; this
/// mapping only fills defaults.
pub fn normalize_patient(raw: &PatientRecord) -> UnifiedRecord {
    UnifiedRecord {
        id: raw.id.clone(),
        clinic_id: raw.clinic_id.clone(),
        name: text(&raw.name),
        phone: text(&raw.phone),
        email: text(&raw.email),
        service: text(&raw.service),
        price: raw.price.unwrap_or(0.0),
        date: text(&raw.date),
        time: text(&raw.time),
        status: status_or_default(&raw.status),
        source: RecordSource::Dashboard,
    }
}

/// Appointment rows may use either naming convention and may carry no
/// tenant key at all; `fallback_clinic` (the tenant the caller is acting
/// for) fills the gap so the output always has a tenant.
pub fn normalize_appointment(raw: &AppointmentRecord, fallback_clinic: &str) -> UnifiedRecord {
    let clinic_id = first_non_empty(&raw.clinic_id, &raw.clinic_name)
        .unwrap_or_else(|| fallback_clinic.to_string());

    let source = raw
        .source
        .as_deref()
        .and_then(|s| RecordSource::from_str(s).ok())
        .unwrap_or(RecordSource::Whatsapp);

    UnifiedRecord {
        id: raw.id.clone(),
        clinic_id,
        name: first_non_empty(&raw.name, &raw.patient_name).unwrap_or_default(),
        phone: text(&raw.phone),
        email: text(&raw.email),
        service: text(&raw.service),
        price: raw.price.unwrap_or(0.0),
        date: first_non_empty(&raw.date, &raw.appointment_date).unwrap_or_default(),
        time: first_non_empty(&raw.time, &raw.appointment_time).unwrap_or_default(),
        status: status_or_default(&raw.status),
        source,
    }
}

/// Coerce a JSON price value to a number. Write-path inputs arrive as
/// numbers or numeric strings depending on the dashboard revision;
/// anything unparseable is 0.
pub fn coerce_price(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn text(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}

fn status_or_default(status: &Option<String>) -> String {
    match status.as_deref() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => DEFAULT_STATUS.to_string(),
    }
}

fn first_non_empty(preferred: &Option<String>, fallback: &Option<String>) -> Option<String> {
    preferred
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| fallback.as_deref().filter(|s| !s.is_empty()))
        .map(ToString::to_string)
}
