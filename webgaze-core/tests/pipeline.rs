//! Integration tests for the webgaze monitoring pipeline
//!
//! These tests drive a `PageMonitor` end-to-end with a scripted page, a
//! recording delivery sink, and tokio's paused clock, so the 500ms settle
//! and 3s dwell timers run deterministically instead of in wall time.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Local, TimeZone};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::{sleep, Duration};

use webgaze_core::clock::ManualClock;
use webgaze_core::collector::{BrowsingPayload, Deliver};
use webgaze_core::settings::{MemorySettings, CHILD_EMAIL_KEY};
use webgaze_core::{Error, PageHandle, PageMonitor, PageSignal, Result};

/// A page whose location and title tests mutate mid-run.
struct ScriptedPage {
    state: Mutex<(String, String)>,
}

impl ScriptedPage {
    fn new(url: &str, title: &str) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new((url.to_string(), title.to_string())),
        })
    }

    fn navigate(&self, url: &str, title: &str) {
        *self.state.lock().unwrap() = (url.to_string(), title.to_string());
    }
}

impl PageHandle for ScriptedPage {
    fn location(&self) -> String {
        self.state.lock().unwrap().0.clone()
    }

    fn title(&self) -> String {
        self.state.lock().unwrap().1.clone()
    }
}

/// Delivery sink that records payloads instead of touching the network.
#[derive(Default)]
struct RecordingSink {
    delivered: Mutex<Vec<BrowsingPayload>>,
    attempts: AtomicUsize,
    fail_next: AtomicBool,
}

impl RecordingSink {
    fn delivered(&self) -> Vec<BrowsingPayload> {
        self.delivered.lock().unwrap().clone()
    }

    fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Deliver for RecordingSink {
    async fn deliver(&self, payload: &BrowsingPayload) -> Result<serde_json::Value> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(Error::Collector("connection refused".to_string()));
        }
        self.delivered.lock().unwrap().push(payload.clone());
        Ok(serde_json::json!({"status": "success"}))
    }
}

fn settings_with_email() -> MemorySettings {
    let mut settings = MemorySettings::new();
    settings.set(CHILD_EMAIL_KEY, "kid@example.com");
    settings
}

fn clock_at_hour(hour: u32) -> Arc<ManualClock> {
    Arc::new(ManualClock::fixed(
        Local.with_ymd_and_hms(2024, 6, 1, hour, 30, 0).unwrap(),
    ))
}

/// Attach a monitor, spawn its run loop, and hand back the signal sender.
async fn start_monitor(
    page: Arc<ScriptedPage>,
    sink: Arc<RecordingSink>,
    clock: Arc<ManualClock>,
) -> UnboundedSender<PageSignal> {
    let monitor = PageMonitor::attach(page, &settings_with_email(), clock, sink)
        .await
        .unwrap()
        .expect("monitor should attach");

    let (signals, receiver) = mpsc::unbounded_channel();
    tokio::spawn(monitor.run(receiver));
    signals
}

#[tokio::test(start_paused = true)]
async fn initial_load_is_reported_after_dwell() {
    let page = ScriptedPage::new("https://example.com/search?q=cats", "Cats - Search");
    let sink = Arc::new(RecordingSink::default());
    let signals = start_monitor(page, sink.clone(), clock_at_hour(14)).await;

    signals.send(PageSignal::DomReady).unwrap();

    // Still inside the dwell window: nothing reported yet
    sleep(Duration::from_millis(2900)).await;
    assert!(sink.delivered().is_empty());

    sleep(Duration::from_millis(200)).await;
    let delivered = sink.delivered();
    assert_eq!(delivered.len(), 1);

    let payload = &delivered[0];
    assert_eq!(payload.child_email, "kid@example.com");
    assert_eq!(payload.url, "https://example.com/search?q=cats");
    assert_eq!(payload.title, "Cats - Search");
    assert_eq!(payload.query, "cats");
    assert_eq!(payload.duration_sec, 3);
    assert_eq!(payload.hour_of_day, 14);
    assert!(!payload.is_night_time);
}

#[tokio::test(start_paused = true)]
async fn night_hours_are_stamped_from_the_injected_clock() {
    let page = ScriptedPage::new("https://example.com/", "Example");
    let sink = Arc::new(RecordingSink::default());
    let signals = start_monitor(page, sink.clone(), clock_at_hour(23)).await;

    signals.send(PageSignal::DomReady).unwrap();
    sleep(Duration::from_secs(4)).await;

    let delivered = sink.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].hour_of_day, 23);
    assert!(delivered[0].is_night_time);
}

#[tokio::test]
async fn missing_child_email_disables_monitoring() {
    let page = ScriptedPage::new("https://example.com/", "Example");
    let sink = Arc::new(RecordingSink::default());

    let monitor = PageMonitor::attach(
        page,
        &MemorySettings::new(),
        clock_at_hour(14),
        sink.clone(),
    )
    .await
    .unwrap();

    assert!(monitor.is_none());
    assert_eq!(sink.attempts(), 0);
}

#[tokio::test(start_paused = true)]
async fn spa_burst_collapses_to_a_single_settled_report() {
    let page = ScriptedPage::new("https://app.example.com/", "App");
    let sink = Arc::new(RecordingSink::default());
    let signals = start_monitor(page.clone(), sink.clone(), clock_at_hour(14)).await;

    // Two route changes 100ms apart: the second restarts the settle timer,
    // so only the final location is ever reported.
    page.navigate("https://app.example.com/#/inbox", "Inbox");
    signals.send(PageSignal::Mutation).unwrap();
    sleep(Duration::from_millis(100)).await;

    page.navigate("https://app.example.com/#/inbox/42", "Message 42");
    signals.send(PageSignal::Mutation).unwrap();
    sleep(Duration::from_secs(4)).await;

    let delivered = sink.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].url, "https://app.example.com/#/inbox/42");
    assert_eq!(delivered[0].title, "Message 42");
}

#[tokio::test(start_paused = true)]
async fn mutations_without_a_location_change_produce_nothing() {
    let page = ScriptedPage::new("https://example.com/", "Example");
    let sink = Arc::new(RecordingSink::default());
    let signals = start_monitor(page, sink.clone(), clock_at_hour(14)).await;

    for _ in 0..3 {
        signals.send(PageSignal::Mutation).unwrap();
        sleep(Duration::from_millis(200)).await;
    }
    sleep(Duration::from_secs(5)).await;

    assert_eq!(sink.attempts(), 0);
}

#[tokio::test(start_paused = true)]
async fn duplicate_detections_of_the_same_url_report_once() {
    let page = ScriptedPage::new("https://example.com/", "Example");
    let sink = Arc::new(RecordingSink::default());
    let signals = start_monitor(page, sink.clone(), clock_at_hour(14)).await;

    // Two detections 100ms apart carry the same resolved URL; both reach
    // the dedup gate after their dwell, only the first passes.
    signals.send(PageSignal::DomReady).unwrap();
    sleep(Duration::from_millis(100)).await;
    signals.send(PageSignal::DomReady).unwrap();
    sleep(Duration::from_secs(4)).await;

    assert_eq!(sink.delivered().len(), 1);
    assert_eq!(sink.attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn dwell_reports_are_not_cancelled_by_later_navigation() {
    let page = ScriptedPage::new("https://example.com/search?q=cats", "Cats - Search");
    let sink = Arc::new(RecordingSink::default());
    let signals = start_monitor(page.clone(), sink.clone(), clock_at_hour(14)).await;

    signals.send(PageSignal::DomReady).unwrap();

    // A route change mid-dwell schedules its own report; it does not
    // replace the one already in flight.
    sleep(Duration::from_secs(1)).await;
    page.navigate("https://example.com/search?q=dogs", "Dogs - Search");
    signals.send(PageSignal::Mutation).unwrap();

    sleep(Duration::from_millis(4600)).await;
    let delivered = sink.delivered();
    assert_eq!(delivered.len(), 2);
    assert_eq!(delivered[0].query, "cats");
    assert_eq!(delivered[1].query, "dogs");
}

#[tokio::test(start_paused = true)]
async fn delivery_failure_drops_the_event_but_monitoring_continues() {
    let page = ScriptedPage::new("https://example.com/", "Example");
    let sink = Arc::new(RecordingSink::default());
    let signals = start_monitor(page.clone(), sink.clone(), clock_at_hour(14)).await;

    sink.fail_next();
    signals.send(PageSignal::DomReady).unwrap();
    sleep(Duration::from_millis(3500)).await;

    // First report failed and was dropped
    assert_eq!(sink.attempts(), 1);
    assert!(sink.delivered().is_empty());

    page.navigate("https://example.com/next", "Next");
    signals.send(PageSignal::Mutation).unwrap();
    sleep(Duration::from_secs(4)).await;

    let delivered = sink.delivered();
    assert_eq!(sink.attempts(), 2);
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].url, "https://example.com/next");
}

#[tokio::test(start_paused = true)]
async fn closing_the_signal_channel_stops_the_monitor() {
    let page = ScriptedPage::new("https://example.com/", "Example");
    let sink = Arc::new(RecordingSink::default());

    let monitor = PageMonitor::attach(page, &settings_with_email(), clock_at_hour(14), sink)
        .await
        .unwrap()
        .expect("monitor should attach");

    let (signals, receiver) = mpsc::unbounded_channel();
    let handle = tokio::spawn(monitor.run(receiver));

    drop(signals);
    handle.await.unwrap();
}
