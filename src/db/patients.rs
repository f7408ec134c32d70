//! Repository for the dashboard-authored `patients` collection.

use rusqlite::{params, Connection};

use super::StoreError;
use crate::models::PatientRecord;

const COLUMNS: &str =
    "id, clinic_id, name, phone, email, service, price, date, time, status";

pub fn insert_patient(conn: &Connection, rec: &PatientRecord) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO patients (id, clinic_id, name, phone, email, service, price, date, time, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            rec.id,
            rec.clinic_id,
            rec.name,
            rec.phone,
            rec.email,
            rec.service,
            rec.price,
            rec.date,
            rec.time,
            rec.status,
        ],
    )?;
    Ok(())
}

pub fn get_patient(conn: &Connection, id: &str) -> Result<Option<PatientRecord>, StoreError> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM patients WHERE id = ?1"))?;

    match stmt.query_row(params![id], patient_from_row) {
        Ok(rec) => Ok(Some(rec)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Full-row update. Returns the number of rows changed (0 when the id is
/// unknown; the caller decides whether that is an error).
pub fn update_patient(conn: &Connection, rec: &PatientRecord) -> Result<usize, StoreError> {
    let changed = conn.execute(
        "UPDATE patients
         SET clinic_id = ?2, name = ?3, phone = ?4, email = ?5, service = ?6,
             price = ?7, date = ?8, time = ?9, status = ?10
         WHERE id = ?1",
        params![
            rec.id,
            rec.clinic_id,
            rec.name,
            rec.phone,
            rec.email,
            rec.service,
            rec.price,
            rec.date,
            rec.time,
            rec.status,
        ],
    )?;
    Ok(changed)
}

/// Delete by id. Returns the number of rows deleted.
pub fn delete_patient(conn: &Connection, id: &str) -> Result<usize, StoreError> {
    let deleted = conn.execute("DELETE FROM patients WHERE id = ?1", params![id])?;
    Ok(deleted)
}

/// All records for one tenant. Patients are always scoped: the dashboard
/// write path sets clinic_id unconditionally, so exact match is enough.
pub fn list_patients_for_clinic(
    conn: &Connection,
    clinic_id: &str,
) -> Result<Vec<PatientRecord>, StoreError> {
    let mut stmt =
        conn.prepare(&format!("SELECT {COLUMNS} FROM patients WHERE clinic_id = ?1"))?;
    let rows = stmt.query_map(params![clinic_id], patient_from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
}

/// Records sharing a phone number, used by the propagation and cascade
/// paths of the write coordinator.
pub fn list_patients_by_phone(
    conn: &Connection,
    phone: &str,
) -> Result<Vec<PatientRecord>, StoreError> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM patients WHERE phone = ?1"))?;
    let rows = stmt.query_map(params![phone], patient_from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
}

pub fn delete_patients_by_phone(conn: &Connection, phone: &str) -> Result<usize, StoreError> {
    let deleted = conn.execute("DELETE FROM patients WHERE phone = ?1", params![phone])?;
    Ok(deleted)
}

fn patient_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PatientRecord> {
    Ok(PatientRecord {
        id: row.get(0)?,
        clinic_id: row.get(1)?,
        name: row.get(2)?,
        phone: row.get(3)?,
        email: row.get(4)?,
        service: row.get(5)?,
        price: row.get(6)?,
        date: row.get(7)?,
        time: row.get(8)?,
        status: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn sample(id: &str, clinic: &str, phone: &str) -> PatientRecord {
        PatientRecord {
            id: id.into(),
            clinic_id: clinic.into(),
            name: Some("Asha".into()),
            phone: Some(phone.into()),
            email: Some("asha@example.com".into()),
            service: Some("Cleaning".into()),
            price: Some(200.0),
            date: Some("2024-03-01".into()),
            time: Some("10:00".into()),
            status: Some("Pending".into()),
        }
    }

    #[test]
    fn insert_then_get_round_trips() {
        let conn = open_memory_database().unwrap();
        let rec = sample("p1", "c1", "555");
        insert_patient(&conn, &rec).unwrap();

        let loaded = get_patient(&conn, "p1").unwrap().unwrap();
        assert_eq!(loaded.clinic_id, "c1");
        assert_eq!(loaded.name.as_deref(), Some("Asha"));
        assert_eq!(loaded.price, Some(200.0));
    }

    #[test]
    fn get_unknown_id_is_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_patient(&conn, "missing").unwrap().is_none());
    }

    #[test]
    fn list_is_scoped_to_clinic() {
        let conn = open_memory_database().unwrap();
        insert_patient(&conn, &sample("p1", "c1", "555")).unwrap();
        insert_patient(&conn, &sample("p2", "c2", "666")).unwrap();

        let rows = list_patients_for_clinic(&conn, "c1").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "p1");
    }

    #[test]
    fn update_reports_missing_id() {
        let conn = open_memory_database().unwrap();
        let rec = sample("ghost", "c1", "555");
        assert_eq!(update_patient(&conn, &rec).unwrap(), 0);
    }

    #[test]
    fn delete_by_phone_removes_all_matches() {
        let conn = open_memory_database().unwrap();
        insert_patient(&conn, &sample("p1", "c1", "555")).unwrap();
        insert_patient(&conn, &sample("p2", "c1", "555")).unwrap();
        insert_patient(&conn, &sample("p3", "c1", "777")).unwrap();

        assert_eq!(delete_patients_by_phone(&conn, "555").unwrap(), 2);
        assert!(get_patient(&conn, "p3").unwrap().is_some());
    }

    #[test]
    fn sparse_record_stores_nulls() {
        let conn = open_memory_database().unwrap();
        let rec = PatientRecord {
            id: "p1".into(),
            clinic_id: "c1".into(),
            name: None,
            phone: None,
            email: None,
            service: None,
            price: None,
            date: None,
            time: None,
            status: None,
        };
        insert_patient(&conn, &rec).unwrap();

        let loaded = get_patient(&conn, "p1").unwrap().unwrap();
        assert!(loaded.name.is_none());
        assert!(loaded.price.is_none());
    }
}
