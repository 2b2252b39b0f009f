//! # webgaze-core
//!
//! Core library for webgaze - a browsing activity monitor.
//!
//! This library provides:
//! - Navigation-change detection for one monitored document, covering full
//!   document loads and single-page-application route changes
//! - Search-query extraction and per-page deduplication
//! - Payload assembly and delivery to the monitoring collector
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! The host environment (the browser content script shim) feeds a
//! [`PageSignal`] stream and a [`PageHandle`] into a [`PageMonitor`]; the
//! monitor decides when a page view happened, lets it dwell, and reports
//! it:
//!
//! ```text
//! ┌──────────────┐ signals ┌─────────────┐ payload ┌─────────────────┐
//! │ Host page    │ ──────► │ PageMonitor │ ──────► │ CollectorClient │
//! │ (DOM events) │         │ detect/dwell│         │ (HTTP POST)     │
//! └──────────────┘         └─────────────┘         └─────────────────┘
//! ```
//!
//! One monitor exists per document attachment; a full navigation discards
//! it and the host re-attaches from scratch.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use webgaze_core::clock::SystemClock;
//! use webgaze_core::collector::CollectorClient;
//! use webgaze_core::{Config, PageMonitor, PageSignal};
//!
//! # async fn attach(page: Arc<dyn webgaze_core::PageHandle>) -> webgaze_core::Result<()> {
//! let config = Config::load()?;
//! let client = Arc::new(CollectorClient::new(&config.collector)?);
//! let (signals, receiver) = tokio::sync::mpsc::unbounded_channel();
//!
//! if let Some(monitor) =
//!     PageMonitor::attach(page, &config.monitor, Arc::new(SystemClock), client).await?
//! {
//!     tokio::spawn(monitor.run(receiver));
//!     signals.send(PageSignal::DomReady).ok();
//! }
//! # Ok(())
//! # }
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use monitor::PageMonitor;
pub use page::{PageHandle, PageSignal};
pub use types::PageView;

// Public modules
pub mod clock;
pub mod collector;
pub mod config;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod logging;
pub mod monitor;
pub mod page;
pub mod settings;
pub mod types;
