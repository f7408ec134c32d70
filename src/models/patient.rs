use serde::{Deserialize, Serialize};

/// A dashboard-authored record as stored in the `patients` collection.
///
/// Every non-key field is optional: older dashboard revisions omitted
/// fields freely and no schema validation runs at the store level. Only
/// the tenant key is guaranteed present, because the dashboard write path
/// always sets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: String,
    pub clinic_id: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub service: Option<String>,
    pub price: Option<f64>,
    /// Free string, stored as given. No calendar validation.
    pub date: Option<String>,
    /// Free string, stored as given.
    pub time: Option<String>,
    /// Free string in practice (`Pending`, `Complete`, `Cancelled` plus
    /// drifting casings from older revisions).
    pub status: Option<String>,
}
