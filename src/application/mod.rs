//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - Short link creation,
//!   update, deletion and resolution

pub mod services;
