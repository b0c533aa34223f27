//! Infrastructure layer for external integrations.
//!
//! This layer implements the storage interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`memory`] - In-process repository implementations

pub mod memory;
pub mod persistence;
