//! Ask a Local backend: a question and answer feed for travellers.
//!
//! The crate follows a hexagonal layout. [`domain`] owns the model and the
//! services behind the driving ports, [`inbound`] adapts HTTP requests onto
//! those ports, and [`outbound`] implements the driven ports against
//! PostgreSQL, process memory, and the managed identity service.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

#[cfg(test)]
mod test_support;
