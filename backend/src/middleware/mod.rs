//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns. Currently only
//! trace-id propagation and access logging.

pub mod trace;

pub use trace::Trace;
