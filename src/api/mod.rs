//! HTTP API for the clinic dashboard and the chatbot webhook.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod types;

pub use router::api_router;
pub use types::ApiContext;
