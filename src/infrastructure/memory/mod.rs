//! In-memory repository implementations.
//!
//! Used with `STORAGE_BACKEND=memory` and by the HTTP integration tests.

pub mod memory_shorten_repository;

pub use memory_shorten_repository::MemoryShortenRepository;
