//! Host page boundary
//!
//! The monitor observes a live document through two narrow channels: a
//! handle for reading the current location and title, and a stream of
//! structural signals the host environment feeds into an mpsc channel.
//! How those signals are produced (DOM-ready events, a mutation observer)
//! is entirely the host's concern.

/// Signals the host environment delivers to the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSignal {
    /// The document's structure became ready. Fires once per document.
    DomReady,
    /// A descendant node was added or removed somewhere under the body.
    Mutation,
}

/// Read access to the monitored document.
///
/// Implementations must reflect the document's live state: the monitor
/// re-reads the location on every mutation signal and again when a route
/// transition settles.
pub trait PageHandle: Send + Sync {
    /// The document's current location string.
    fn location(&self) -> String;

    /// The document's current title.
    fn title(&self) -> String;
}
