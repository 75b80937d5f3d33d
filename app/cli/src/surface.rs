//! Channel-backed surface implementation for the REPL.

use sage_dispatch::Surface;
use tokio::sync::mpsc;

/// Surface event marshalled to the REPL loop.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Message { text: String, from_assistant: bool },
    Loading(bool),
}

/// Forwards dispatcher callbacks onto the REPL's event channel.
///
/// The dispatcher invokes these from its drain task; the REPL consumes
/// the channel on its own loop, so transcript printing stays on the
/// primary context.
pub struct ReplSurface {
    tx: mpsc::UnboundedSender<SurfaceEvent>,
}

impl ReplSurface {
    /// Create a surface plus the receiving end of its event channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SurfaceEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Surface for ReplSurface {
    fn message(&self, text: &str, from_assistant: bool) {
        let _ = self.tx.send(SurfaceEvent::Message {
            text: text.to_owned(),
            from_assistant,
        });
    }

    fn loading(&self, active: bool) {
        let _ = self.tx.send(SurfaceEvent::Loading(active));
    }
}
