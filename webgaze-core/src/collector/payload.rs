//! Outbound payload assembly
//!
//! Shapes a detected page view into the record the collector's log
//! endpoint ingests. The serialized field names are part of the wire
//! contract and must not drift.

use chrono::Timelike;
use serde::Serialize;

use crate::clock::Clock;
use crate::types::PageView;

/// Placeholder image score; real thumbnail analysis happens collector-side.
pub const IMAGE_SCORE_PLACEHOLDER: f64 = 0.5;

/// First hour (inclusive) of the night window.
const NIGHT_START_HOUR: u32 = 22;

/// Last hour (inclusive) of the night window.
const NIGHT_END_HOUR: u32 = 6;

/// One browsing event, as the collector's log endpoint expects it.
#[derive(Debug, Clone, Serialize)]
pub struct BrowsingPayload {
    /// Email address identifying the monitored child
    pub child_email: String,
    /// Document title at detection time
    pub title: String,
    /// Resolved page URL
    pub url: String,
    /// Derived search query
    pub query: String,
    /// Local hour the event was reported, 0-23
    pub hour_of_day: u32,
    /// Image score placeholder, passed through unchanged
    pub image_score: f64,
    /// Whole seconds between detection and report
    pub duration_sec: u64,
    /// Whether the report falls in the 22:00-06:59 night window
    pub is_night_time: bool,
}

impl BrowsingPayload {
    /// Assemble the payload for a page view that passed the dedup gate.
    ///
    /// `duration_sec` is the elapsed time since the view was detected,
    /// floored to whole seconds; with the fixed dwell delay it comes out
    /// at about 3 barring scheduling delay.
    pub fn build(view: &PageView, child_email: &str, clock: &dyn Clock) -> Self {
        let hour_of_day = clock.now().hour();

        Self {
            child_email: child_email.to_string(),
            title: view.title.clone(),
            url: view.url.clone(),
            query: view.query.clone(),
            hour_of_day,
            image_score: IMAGE_SCORE_PLACEHOLDER,
            duration_sec: view.observed_at.elapsed().as_secs(),
            is_night_time: is_night_hour(hour_of_day),
        }
    }
}

/// True for hours in the 22:00-06:59 night window.
fn is_night_hour(hour: u32) -> bool {
    hour >= NIGHT_START_HOUR || hour <= NIGHT_END_HOUR
}
