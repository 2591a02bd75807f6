//! HTTP API handlers for folio-server

pub mod buildinfo;
pub mod contact;
pub mod health;
pub mod resume;

pub use buildinfo::{get_build_info, BuildInfo};
pub use contact::{contact_routes, handle_contact};
pub use health::{health_check, health_routes, HealthResponse};
pub use resume::resume_routes;
