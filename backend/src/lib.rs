//! Storefront backend library: catalogue, accounts, orders, and back office.
//!
//! The crate is split hexagonally. [`domain`] owns entities, services, and
//! ports; [`inbound`] adapts HTTP requests onto the driving ports; and
//! [`outbound`] provides the Postgres, in-memory, hashing, and mail adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
