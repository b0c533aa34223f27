//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click counting event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; business rules live in [`crate::application::services`].
//!
//! # Click Processing Flow
//!
//! 1. [`crate::application::services::ShortenService::resolve`] finds a live record
//! 2. A [`click_event::ClickEvent`] is pushed to a bounded channel (non-blocking)
//! 3. [`click_worker::run_click_worker`] applies the increment in the background
//! 4. The counter is persisted via [`repositories::ShortenRepository`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
