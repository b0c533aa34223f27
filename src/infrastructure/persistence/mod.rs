//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//! The schema lives in `migrations/` and is applied at startup.

pub mod pg_shorten_repository;

pub use pg_shorten_repository::PgShortenRepository;
