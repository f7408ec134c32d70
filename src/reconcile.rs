//! Tenant-scoped reconciliation of the two record collections.
//!
//! `list_records` is the single read path the dashboard and exports
//! consume: it pulls the tenant's rows from both collections, normalizes
//! them, collapses same-phone duplicates, and returns one deterministic
//! ordering. The two collection reads are separate snapshots, not a
//! transaction; a write landing between them is visible on the next read.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::Connection;
use thiserror::Error;

use crate::db;
use crate::db::StoreError;
use crate::models::UnifiedRecord;
use crate::normalize::{normalize_appointment, normalize_patient};

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Clinic ID required")]
    MissingClinicId,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// All records visible to one tenant, deduplicated and ordered.
///
/// Scoping: patients match on exact tenant key; appointments match on
/// either tenant field, and rows with no tenant field at all are visible
/// to every tenant (documented legacy leniency).
///
/// Dedup: phone number is the merge key. Patients enter the working map
/// first and appointments second, so on a phone collision the
/// appointment-origin record wins; the losing record is dropped whole,
/// never merged field by field. Records without a phone are all kept.
///
/// Ordering: descending schedule instant (date + time), ties broken by id
/// so a fixed snapshot always lists in the same order.
pub fn list_records(
    conn: &Connection,
    clinic_id: &str,
) -> Result<Vec<UnifiedRecord>, ReconcileError> {
    let clinic_id = clinic_id.trim();
    if clinic_id.is_empty() {
        return Err(ReconcileError::MissingClinicId);
    }

    let patients = db::patients::list_patients_for_clinic(conn, clinic_id)?;
    let appointments = db::appointments::list_appointments_for_tenant(conn, clinic_id)?;

    let normalized = patients
        .iter()
        .map(normalize_patient)
        .chain(
            appointments
                .iter()
                .map(|a| normalize_appointment(a, clinic_id)),
        );

    let mut by_phone: HashMap<String, UnifiedRecord> = HashMap::new();
    let mut unkeyed: Vec<UnifiedRecord> = Vec::new();
    for record in normalized {
        if record.phone.is_empty() {
            unkeyed.push(record);
        } else {
            // Later insertion overwrites earlier
            by_phone.insert(record.phone.clone(), record);
        }
    }

    let mut combined: Vec<UnifiedRecord> = by_phone.into_values().chain(unkeyed).collect();
    combined.sort_by(|a, b| {
        schedule_instant(&b.date, &b.time)
            .cmp(&schedule_instant(&a.date, &a.time))
            .then_with(|| a.id.cmp(&b.id))
    });

    Ok(combined)
}

/// Sort key for a record's free-string date and time.
///
/// Missing or unparseable time falls back to midnight; missing or
/// unparseable date falls back to the epoch date, so broken rows sink to
/// the end of the descending order instead of breaking the sort.
pub fn schedule_instant(date: &str, time: &str) -> NaiveDateTime {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .unwrap_or(NaiveDateTime::UNIX_EPOCH.date());
    let clock = parse_time(time.trim()).unwrap_or(NaiveTime::MIN);
    day.and_time(clock)
}

fn parse_time(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .ok()
}
