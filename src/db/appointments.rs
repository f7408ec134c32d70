//! Repository for the shared `appointments` collection.
//!
//! This collection is written by two producers (the dashboard copy path
//! and the chatbot channel) under two historical naming conventions, so
//! the queries here have to treat `clinic_id` and `clinic_name` as
//! synonyms and tolerate rows that carry neither.

use rusqlite::{params, Connection};

use super::StoreError;
use crate::models::AppointmentRecord;

const COLUMNS: &str = "id, clinic_id, clinic_name, patient_name, name, phone, email, service, \
                       price, appointment_date, appointment_time, date, time, status, source, \
                       created_at";

pub fn insert_appointment(conn: &Connection, rec: &AppointmentRecord) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO appointments (id, clinic_id, clinic_name, patient_name, name, phone, email,
         service, price, appointment_date, appointment_time, date, time, status, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            rec.id,
            rec.clinic_id,
            rec.clinic_name,
            rec.patient_name,
            rec.name,
            rec.phone,
            rec.email,
            rec.service,
            rec.price,
            rec.appointment_date,
            rec.appointment_time,
            rec.date,
            rec.time,
            rec.status,
            rec.source,
            rec.created_at,
        ],
    )?;
    Ok(())
}

pub fn get_appointment(
    conn: &Connection,
    id: &str,
) -> Result<Option<AppointmentRecord>, StoreError> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM appointments WHERE id = ?1"))?;

    match stmt.query_row(params![id], appointment_from_row) {
        Ok(rec) => Ok(Some(rec)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Full-row update. Returns the number of rows changed.
pub fn update_appointment(
    conn: &Connection,
    rec: &AppointmentRecord,
) -> Result<usize, StoreError> {
    let changed = conn.execute(
        "UPDATE appointments
         SET clinic_id = ?2, clinic_name = ?3, patient_name = ?4, name = ?5, phone = ?6,
             email = ?7, service = ?8, price = ?9, appointment_date = ?10,
             appointment_time = ?11, date = ?12, time = ?13, status = ?14, source = ?15
         WHERE id = ?1",
        params![
            rec.id,
            rec.clinic_id,
            rec.clinic_name,
            rec.patient_name,
            rec.name,
            rec.phone,
            rec.email,
            rec.service,
            rec.price,
            rec.appointment_date,
            rec.appointment_time,
            rec.date,
            rec.time,
            rec.status,
            rec.source,
        ],
    )?;
    Ok(changed)
}

pub fn delete_appointment(conn: &Connection, id: &str) -> Result<usize, StoreError> {
    let deleted = conn.execute("DELETE FROM appointments WHERE id = ?1", params![id])?;
    Ok(deleted)
}

/// All appointments visible to one tenant.
///
/// A row matches when either tenant field equals the tenant key, or when
/// both tenant fields are absent/empty. The second arm is deliberate:
/// legacy unscoped rows predate tenant keys on this collection and remain
/// visible to every tenant rather than silently disappearing.
pub fn list_appointments_for_tenant(
    conn: &Connection,
    clinic_id: &str,
) -> Result<Vec<AppointmentRecord>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM appointments
         WHERE clinic_id = ?1
            OR clinic_name = ?1
            OR ((clinic_id IS NULL OR clinic_id = '')
                AND (clinic_name IS NULL OR clinic_name = ''))"
    ))?;
    let rows = stmt.query_map(params![clinic_id], appointment_from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
}

pub fn list_appointments_by_phone(
    conn: &Connection,
    phone: &str,
) -> Result<Vec<AppointmentRecord>, StoreError> {
    let mut stmt =
        conn.prepare(&format!("SELECT {COLUMNS} FROM appointments WHERE phone = ?1"))?;
    let rows = stmt.query_map(params![phone], appointment_from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
}

pub fn delete_appointments_by_phone(conn: &Connection, phone: &str) -> Result<usize, StoreError> {
    let deleted = conn.execute("DELETE FROM appointments WHERE phone = ?1", params![phone])?;
    Ok(deleted)
}

fn appointment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AppointmentRecord> {
    Ok(AppointmentRecord {
        id: row.get(0)?,
        clinic_id: row.get(1)?,
        clinic_name: row.get(2)?,
        patient_name: row.get(3)?,
        name: row.get(4)?,
        phone: row.get(5)?,
        email: row.get(6)?,
        service: row.get(7)?,
        price: row.get(8)?,
        appointment_date: row.get(9)?,
        appointment_time: row.get(10)?,
        date: row.get(11)?,
        time: row.get(12)?,
        status: row.get(13)?,
        source: row.get(14)?,
        created_at: row.get(15)?,
    })
}
