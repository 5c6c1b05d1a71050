//! Observability module
//!
//! Logging and the structured result-event stream for bomb runs.

pub mod events;
pub mod logging;

pub use events::{Event, EventEmitter, Notification, Status};
pub use logging::{LogFormat, init_logging};
