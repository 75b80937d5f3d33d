//! Conversation-surface seam.

/// Callbacks from the dispatcher to the front end.
///
/// The dispatcher invokes these from its background drain task (and
/// `message` with `from_assistant = false` from the submitting context);
/// implementations are responsible for marshalling onto their own primary
/// event loop before mutating any visible state. Calls for a single
/// request arrive in order, and loading transitions strictly alternate.
pub trait Surface: Send + Sync + 'static {
    /// Append a line to the ordered transcript.
    fn message(&self, text: &str, from_assistant: bool);

    /// Show or hide the pending-response indicator.
    fn loading(&self, active: bool);
}
