//! Clinic deployment configuration.
//!
//! One `ClinicConfig` value is read from the environment at startup and
//! passed into the API context and write coordinator by value. Nothing
//! reads process environment at request time.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const APP_NAME: &str = "clinicdesk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_PORT: u16 = 5000;

/// Immutable per-deployment settings. Each deployment serves one primary
/// clinic account (seeded at startup); additional clinics can exist in the
/// store and log in normally.
#[derive(Debug, Clone)]
pub struct ClinicConfig {
    /// Tenant key of the clinic this deployment is provisioned for.
    pub clinic_id: String,
    /// Display name written into appointment copies and shown after login.
    pub clinic_name: String,
    pub username: String,
    pub password: String,
    pub port: u16,
    pub db_path: PathBuf,
}

impl ClinicConfig {
    /// Read configuration from the environment. Missing values become
    /// empty strings / defaults; whether enough is present to seed the
    /// clinic account is checked separately via `has_seed_account`.
    pub fn from_env() -> Self {
        let clinic_id = env::var("CLINIC_ID").unwrap_or_default();
        let clinic_name = env::var("CLINIC_NAME").unwrap_or_else(|_| clinic_id.clone());
        Self {
            clinic_id,
            clinic_name,
            username: env::var("CLINIC_USERNAME").unwrap_or_default(),
            password: env::var("CLINIC_PASSWORD").unwrap_or_default(),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            db_path: env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_db_path()),
        }
    }

    /// True when the environment carried everything needed to auto-create
    /// the clinic account at startup.
    pub fn has_seed_account(&self) -> bool {
        !self.clinic_id.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Get the application data directory (`~/.clinicdesk/`).
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(".clinicdesk")
}

pub fn default_db_path() -> PathBuf {
    app_data_dir().join("clinicdesk.db")
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "info,clinicdesk=debug"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with(".clinicdesk"));
    }

    #[test]
    fn default_db_path_under_app_data() {
        let path = default_db_path();
        assert!(path.starts_with(app_data_dir()));
    }

    #[test]
    fn seed_account_requires_all_three_fields() {
        let full = ClinicConfig {
            clinic_id: "clinic42".into(),
            clinic_name: "Clinic 42".into(),
            username: "front-desk".into(),
            password: "secret".into(),
            port: DEFAULT_PORT,
            db_path: PathBuf::from("/tmp/test.db"),
        };
        assert!(full.has_seed_account());

        let missing_password = ClinicConfig {
            password: String::new(),
            ..full.clone()
        };
        assert!(!missing_password.has_seed_account());

        let missing_id = ClinicConfig {
            clinic_id: String::new(),
            ..full
        };
        assert!(!missing_id.has_seed_account());
    }

    #[test]
    fn bind_addr_uses_configured_port() {
        let config = ClinicConfig {
            clinic_id: String::new(),
            clinic_name: String::new(),
            username: String::new(),
            password: String::new(),
            port: 8123,
            db_path: PathBuf::from("/tmp/test.db"),
        };
        assert_eq!(config.bind_addr().port(), 8123);
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
