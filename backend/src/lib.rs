//! Collaborative shopping list backend.
//!
//! Requests flow through one pipeline: parse and validate the `dtoIn`,
//! resolve the caller's identity from headers, load the list's owner and
//! members, authorize, then touch storage. Every response is wrapped in the
//! `{dtoOut, uuAppErrorMap}` envelope.

pub mod api;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
