//! Backend library modules for the user directory service.
//!
//! A single `User` entity managed through create, read, update and delete
//! operations. The domain core owns every business rule; transports and
//! persistence plug into it through explicit ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
