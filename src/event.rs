//! Change-notification sink
//!
//! The metadata service can publish modification events to interested
//! consumers. The creation path only needs a narrow slice of that: a flag
//! telling whether notification is on, and a fire-and-forget file-created
//! event keyed by the new entry's ID. Delivery is best-effort; the event is
//! only emitted after the metadata store confirmed the creation.

/// Modification-event sink collaborator
pub trait ModEventSink {
    /// Whether event notification is enabled at all
    fn enabled(&self) -> bool;

    /// A file with the given entry ID was created
    fn file_created(&self, entry_id: &str);
}

/// Sink for deployments with notification disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventSink;

impl ModEventSink for NullEventSink {
    fn enabled(&self) -> bool {
        false
    }

    fn file_created(&self, _entry_id: &str) {}
}

/// Sink that publishes events to the tracing layer
///
/// Useful for single-node deployments and tests where no real event
/// consumer is wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEventSink;

impl ModEventSink for LoggingEventSink {
    fn enabled(&self) -> bool {
        true
    }

    fn file_created(&self, entry_id: &str) {
        tracing::info!(entry_id, "file created");
    }
}
