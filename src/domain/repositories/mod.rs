//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure`. Mock implementations are generated via `mockall`
//! for unit tests.

pub mod shorten_repository;

pub use shorten_repository::ShortenRepository;

#[cfg(test)]
pub use shorten_repository::MockShortenRepository;
