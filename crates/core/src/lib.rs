//! # MediSync Core
//!
//! Domain types shared across the MediSync clinic booking service:
//! user roles, slot and appointment models, request/response payloads,
//! and the error taxonomy used by every layer.
//!
//! This crate is I/O free. Persistence lives in `medisync-db` and the
//! HTTP surface in `medisync-api`.

/// Error taxonomy for all clinic operations
pub mod errors;
/// Domain models and API payloads
pub mod models;
