use serde::{Deserialize, Serialize};

/// A clinic account: tenant key, login credentials, and the display name
/// shown on the dashboard. Credentials are stored and compared in clear
/// text; hardening the login path is out of scope for this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicAccount {
    pub clinic_id: String,
    pub username: String,
    pub password: String,
    pub name: Option<String>,
}
