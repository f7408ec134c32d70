use serde::{Deserialize, Serialize};

/// A record as stored in the shared `appointments` collection, written by
/// either the dashboard copy path or the chatbot channel.
///
/// The collection accumulated two naming conventions over time, so both
/// column sets exist side by side: `name`/`date`/`time`/`clinic_id`
/// (dashboard convention) and `patient_name`/`appointment_date`/
/// `appointment_time`/`clinic_name` (chatbot convention). A given row may
/// populate either set, both, or neither. Rows with no tenant field at all
/// are legacy unscoped records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: String,
    pub clinic_id: Option<String>,
    pub clinic_name: Option<String>,
    pub patient_name: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub service: Option<String>,
    pub price: Option<f64>,
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    /// `whatsapp` or `dashboard`; free string at the store level.
    pub source: Option<String>,
    pub created_at: Option<String>,
}
