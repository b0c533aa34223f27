//! Click event model for asynchronous click counting.

/// A successful resolution waiting to be counted.
///
/// Sent from the redirect path to [`crate::domain::click_worker::run_click_worker`]
/// over a bounded channel so the redirect response never waits on the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub code: String,
}

impl ClickEvent {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}
