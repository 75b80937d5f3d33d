//! Single-flight request dispatch.
//!
//! Serializes user-submitted queries into a FIFO queue drained by at most
//! one background task, so at most one provider call is in flight
//! system-wide and responses reach the conversation surface in strict
//! submission order.

pub use dispatcher::{Dispatcher, Request, SearchMode};
pub use session::Session;
pub use surface::Surface;

mod dispatcher;
mod session;
mod surface;
