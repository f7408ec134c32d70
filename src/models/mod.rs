pub mod appointment;
pub mod clinic;
pub mod enums;
pub mod patient;
pub mod unified;

pub use appointment::AppointmentRecord;
pub use clinic::ClinicAccount;
pub use enums::RecordSource;
pub use patient::PatientRecord;
pub use unified::UnifiedRecord;
