//! Outbound adapters implementing the driven ports.
//!
//! - [`persistence`]: PostgreSQL repositories on Diesel.
//! - [`memory`]: lock-protected in-memory repositories for database-less runs.
//! - [`security`]: Argon2 password hashing.
//! - [`notify`]: logging and HTTP-relay mail notifiers.
//!
//! Adapters translate between domain types and infrastructure
//! representations and hold no business rules.

pub mod memory;
pub mod notify;
pub mod persistence;
pub mod security;
