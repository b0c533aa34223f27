//! Core domain entities.
//!
//! Entities are plain data structures. Creation uses a separate `New*` struct
//! so the store can assign surrogate ids and counters.

pub mod shorten;

pub use shorten::{NewShortenRecord, ShortenRecord};
