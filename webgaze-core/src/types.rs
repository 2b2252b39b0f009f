//! Core domain types for webgaze
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Page view** | One visit to a resolved URL, detected either at document load or on an in-document route change |
//! | **Dwell** | The fixed delay between detecting a page view and reporting it |
//! | **Collector** | The remote endpoint that receives browsing event payloads |

use tokio::time::Instant;

/// A detected page view awaiting its dwell delay.
///
/// Captured at detection time and consumed exactly once when the dwell
/// timer fires: either reported to the collector or dropped as a duplicate.
#[derive(Debug, Clone)]
pub struct PageView {
    /// Resolved location at detection time
    pub url: String,
    /// Document title at detection time
    pub title: String,
    /// Derived search query (`q` parameter, or the title as fallback)
    pub query: String,
    /// When the view was detected; anchors the reported dwell duration
    pub observed_at: Instant,
}
