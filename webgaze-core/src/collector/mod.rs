//! Browsing-event collector client
//!
//! The collector is the remote endpoint that receives navigation event
//! payloads for analysis. Delivery is fire-and-forget: an event that fails
//! to send is logged and dropped, never queued, so a collector outage can
//! never stall monitoring.

mod client;
mod payload;

pub use client::{CollectorClient, Deliver};
pub use payload::{BrowsingPayload, IMAGE_SCORE_PLACEHOLDER};
