//! Emission deduplication
//!
//! Suppresses repeated reports for the URL the monitor most recently
//! logged. Comparison is by URL string only, never page content.

/// Tracks the last URL that passed the emission gate.
///
/// One gate exists per monitored document; a full navigation tears the
/// monitor down and starts a fresh gate. The gate is consulted when a
/// dwell timer fires, not when a page change is detected, so two
/// detections of the same URL scheduled close together both reach the
/// check and only the first to run passes.
#[derive(Debug, Default)]
pub struct DedupGate {
    last_url: Option<String>,
}

impl DedupGate {
    /// Create a gate with no recorded URL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether a report for `url` may be emitted.
    ///
    /// Returns false for a repeat of the last recorded URL, leaving the
    /// gate unchanged. Otherwise records `url` and returns true.
    pub fn should_emit(&mut self, url: &str) -> bool {
        if self.last_url.as_deref() == Some(url) {
            return false;
        }
        self.last_url = Some(url.to_string());
        true
    }

    /// The URL most recently recorded by the gate, if any.
    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }
}
