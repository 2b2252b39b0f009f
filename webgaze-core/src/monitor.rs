//! Navigation monitoring pipeline
//!
//! `PageMonitor` watches one document for page views: the initial load and
//! any in-document route changes a client-rendered application performs
//! without a full navigation. Each detected view dwells for a fixed delay,
//! passes the dedup gate, and is reported to the collector.
//!
//! ```text
//! PageSignal stream ──► run loop ──► dwell (3s) ──► DedupGate ──► Deliver
//!                          │
//!                   settle timer (500ms)
//! ```

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::time::{sleep, Duration, Instant};

use crate::clock::Clock;
use crate::collector::{BrowsingPayload, Deliver};
use crate::dedup::DedupGate;
use crate::error::Result;
use crate::extract;
use crate::page::{PageHandle, PageSignal};
use crate::settings::{SettingsStore, CHILD_EMAIL_KEY};
use crate::types::PageView;

/// Quiet period after a location-changing mutation before a route
/// transition counts as settled.
const SPA_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Minimum dwell on a page before its view is reported.
const DWELL_DELAY: Duration = Duration::from_secs(3);

/// Monitors a single document for page views.
///
/// One monitor exists per document attachment. A full navigation discards
/// it along with the rest of the script context; the host re-attaches a
/// fresh monitor with a fresh dedup gate.
pub struct PageMonitor {
    page: Arc<dyn PageHandle>,
    clock: Arc<dyn Clock>,
    delivery: Arc<dyn Deliver>,
    dedup: Arc<Mutex<DedupGate>>,
    child_email: String,
}

impl PageMonitor {
    /// Attach a monitor to a document.
    ///
    /// Reads the child email from the settings store once, before any
    /// detection logic activates. Returns `Ok(None)` when the value is
    /// missing or empty; monitoring stays disabled for this document load.
    pub async fn attach(
        page: Arc<dyn PageHandle>,
        settings: &dyn SettingsStore,
        clock: Arc<dyn Clock>,
        delivery: Arc<dyn Deliver>,
    ) -> Result<Option<Self>> {
        let child_email = match settings.get(CHILD_EMAIL_KEY).await? {
            Some(email) if !email.is_empty() => email,
            _ => {
                tracing::warn!("no child email configured; monitoring disabled for this page");
                return Ok(None);
            }
        };

        Ok(Some(Self {
            page,
            clock,
            delivery,
            dedup: Arc::new(Mutex::new(DedupGate::new())),
            child_email,
        }))
    }

    /// Run the detection loop until the host closes the signal channel.
    ///
    /// Two triggers produce page views: the one-shot `DomReady` signal, and
    /// mutation bursts whose location differs from the last settled one.
    /// Mutations restart the settle timer; when it fires untouched, the
    /// settled location (never an intermediate one) becomes the view.
    pub async fn run(self, mut signals: mpsc::UnboundedReceiver<PageSignal>) {
        let mut last_href = self.page.location();

        let settle = sleep(SPA_SETTLE_DELAY);
        tokio::pin!(settle);
        let mut settle_armed = false;

        loop {
            tokio::select! {
                signal = signals.recv() => match signal {
                    None => break,
                    Some(PageSignal::DomReady) => {
                        tracing::debug!(url = %self.page.location(), "document ready");
                        self.schedule_report();
                    }
                    Some(PageSignal::Mutation) => {
                        // A location change mid-churn restarts the settle
                        // timer; mutations under a stable location leave
                        // any pending timer running.
                        if self.page.location() != last_href {
                            settle.as_mut().reset(Instant::now() + SPA_SETTLE_DELAY);
                            settle_armed = true;
                        }
                    }
                },
                () = &mut settle, if settle_armed => {
                    settle_armed = false;
                    last_href = self.page.location();
                    tracing::debug!(url = %last_href, "detected in-document navigation");
                    self.schedule_report();
                }
            }
        }

        tracing::debug!("signal channel closed, monitor detached");
    }

    /// Capture the current page state and schedule its report.
    ///
    /// The dwell timer is not cancellable: a route change during the dwell
    /// window schedules its own report rather than replacing this one, and
    /// the dedup gate arbitrates at emission time.
    fn schedule_report(&self) {
        let url = self.page.location();
        let title = self.page.title();
        let query = extract::search_query(&url, &title);
        let view = PageView {
            url,
            title,
            query,
            observed_at: Instant::now(),
        };

        let dedup = Arc::clone(&self.dedup);
        let clock = Arc::clone(&self.clock);
        let delivery = Arc::clone(&self.delivery);
        let child_email = self.child_email.clone();

        tokio::spawn(async move {
            sleep(DWELL_DELAY).await;

            if !dedup.lock().await.should_emit(&view.url) {
                tracing::debug!(url = %view.url, "skipping duplicate report");
                return;
            }

            let payload = BrowsingPayload::build(&view, &child_email, clock.as_ref());
            match delivery.deliver(&payload).await {
                Ok(reply) => {
                    tracing::debug!(url = %payload.url, reply = %reply, "reported page view");
                }
                Err(error) => {
                    tracing::warn!(url = %payload.url, %error, "failed to report page view");
                }
            }
        });
    }
}
