use serde::{Deserialize, Serialize};

use super::enums::RecordSource;

/// Default status applied when a record carries none.
pub const DEFAULT_STATUS: &str = "Pending";

/// The one canonical record shape the reconciler produces and the
/// dashboard consumes. Every field is populated: absent source fields
/// become empty strings or the documented defaults, never null.
///
/// `id` is always the identity of the origin store document. The
/// reconciler never fabricates composite records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedRecord {
    pub id: String,
    #[serde(rename = "clinicId")]
    pub clinic_id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub service: String,
    pub price: f64,
    pub date: String,
    pub time: String,
    pub status: String,
    pub source: RecordSource,
}
