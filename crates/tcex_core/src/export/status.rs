//! Status notifications for the embedding application.
//!
//! The orchestrator emits human-readable status strings at phase
//! boundaries; the embedding application decides how to render them (status
//! bar, console, ...). Sinks must tolerate being called from async context
//! without blocking.

use tokio::sync::mpsc;

/// Receiver of status notifications.
pub trait StatusSink: Send + Sync {
    /// Called with a human-readable status message at a phase boundary.
    fn on_status(&self, message: &str);
}

/// Sink that discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn on_status(&self, _message: &str) {}
}

/// Sink that forwards notifications to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn on_status(&self, message: &str) {
        tracing::info!(status = message);
    }
}

/// Channel-backed sink for applications that consume status messages
/// asynchronously. A closed receiver drops further messages silently.
impl StatusSink for mpsc::UnboundedSender<String> {
    fn on_status(&self, message: &str) {
        let _ = self.send(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_sink_delivers_messages() {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        tx.on_status("loading started");
        tx.on_status("loading finished");
        assert_eq!(rx.try_recv().unwrap(), "loading started");
        assert_eq!(rx.try_recv().unwrap(), "loading finished");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_sink_survives_dropped_receiver() {
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        drop(rx);
        tx.on_status("nobody listens");
    }
}
