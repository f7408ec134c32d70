//! Repository for clinic accounts (login + dashboard config).

use rusqlite::{params, Connection};

use super::StoreError;
use crate::config::ClinicConfig;
use crate::models::ClinicAccount;

pub fn get_clinic(conn: &Connection, clinic_id: &str) -> Result<Option<ClinicAccount>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT clinic_id, username, password, name FROM clinics WHERE clinic_id = ?1",
    )?;

    match stmt.query_row(params![clinic_id], clinic_from_row) {
        Ok(rec) => Ok(Some(rec)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Clear-text credential match. The login path intentionally performs no
/// hashing; see the deployment notes before changing this.
pub fn find_by_credentials(
    conn: &Connection,
    username: &str,
    password: &str,
) -> Result<Option<ClinicAccount>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT clinic_id, username, password, name
         FROM clinics WHERE username = ?1 AND password = ?2",
    )?;

    match stmt.query_row(params![username, password], clinic_from_row) {
        Ok(rec) => Ok(Some(rec)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Create the configured clinic account if it does not exist yet.
/// Returns `true` when a new account was inserted.
pub fn ensure_clinic(conn: &Connection, config: &ClinicConfig) -> Result<bool, StoreError> {
    if get_clinic(conn, &config.clinic_id)?.is_some() {
        return Ok(false);
    }
    conn.execute(
        "INSERT INTO clinics (clinic_id, username, password, name) VALUES (?1, ?2, ?3, ?4)",
        params![
            config.clinic_id,
            config.username,
            config.password,
            config.clinic_name,
        ],
    )?;
    Ok(true)
}

fn clinic_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ClinicAccount> {
    Ok(ClinicAccount {
        clinic_id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
        name: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use std::path::PathBuf;

    fn test_config() -> ClinicConfig {
        ClinicConfig {
            clinic_id: "clinic42".into(),
            clinic_name: "Clinic 42".into(),
            username: "front-desk".into(),
            password: "secret".into(),
            port: 5000,
            db_path: PathBuf::from(":memory:"),
        }
    }

    #[test]
    fn ensure_clinic_inserts_once() {
        let conn = open_memory_database().unwrap();
        let config = test_config();

        assert!(ensure_clinic(&conn, &config).unwrap());
        assert!(!ensure_clinic(&conn, &config).unwrap());

        let clinic = get_clinic(&conn, "clinic42").unwrap().unwrap();
        assert_eq!(clinic.name.as_deref(), Some("Clinic 42"));
    }

    #[test]
    fn credentials_must_match_exactly() {
        let conn = open_memory_database().unwrap();
        ensure_clinic(&conn, &test_config()).unwrap();

        assert!(find_by_credentials(&conn, "front-desk", "secret")
            .unwrap()
            .is_some());
        assert!(find_by_credentials(&conn, "front-desk", "Secret")
            .unwrap()
            .is_none());
        assert!(find_by_credentials(&conn, "someone", "secret")
            .unwrap()
            .is_none());
    }
}
