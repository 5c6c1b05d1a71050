//! Structured result-event stream.
//!
//! Discrete, typed events emitted while a bomb runs. Events are serialized
//! as newline-delimited JSON (JSONL) and include a monotonically increasing
//! sequence number for ordering. Every event after `BombStarted` carries
//! the compact notification string a grading server would receive.

use std::fmt;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// Run status reported in a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The latest phase passed.
    Defused,
    /// The bomb blew up.
    Exploded,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defused => f.write_str("defused"),
            Self::Exploded => f.write_str("exploded"),
        }
    }
}

/// `bomb_id:status:lines:last_line`, as sent to the result server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Bomb that produced the result.
    pub bomb_id: u32,
    /// Outcome so far.
    pub status: Status,
    /// Lines consumed so far.
    pub lines: usize,
    /// Most recent line, or empty before any input.
    pub last_line: String,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.bomb_id, self.status, self.lines, self.last_line
        )
    }
}

impl Serialize for Notification {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Event variants
// ---------------------------------------------------------------------------

/// A discrete event emitted during a bomb run.
///
/// Each variant is tagged with `"type"` when serialized to JSON so consumers
/// can dispatch on the event kind.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The bomb is armed and waiting for phase 1.
    BombStarted {
        /// When the run started.
        timestamp: DateTime<Utc>,
        /// Bomb identifier.
        bomb_id: u32,
        /// Variant in each slot, comma separated.
        phases: String,
    },

    /// A phase accepted its line.
    PhaseDefused {
        /// When the phase passed.
        timestamp: DateTime<Utc>,
        /// One-based phase number; the secret phase is `7`.
        phase: usize,
        /// Result notification.
        notification: Notification,
    },

    /// A phase rejected its line.
    BombExploded {
        /// When the bomb exploded.
        timestamp: DateTime<Utc>,
        /// Phase that rejected the line.
        phase: usize,
        /// Result notification.
        notification: Notification,
    },

    /// The passphrase was found after phase 6.
    SecretUnlocked {
        /// When the secret phase was unlocked.
        timestamp: DateTime<Utc>,
        /// Result notification.
        notification: Notification,
    },

    /// Every phase the run required has passed.
    BombDefused {
        /// When the run finished.
        timestamp: DateTime<Utc>,
        /// Whether the secret phase was also solved.
        secret: bool,
        /// Result notification.
        notification: Notification,
    },
}

// ---------------------------------------------------------------------------
// Envelope (adds sequence number)
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct EventEnvelope {
    sequence: u64,
    #[serde(flatten)]
    event: Event,
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

/// Thread-safe JSONL event writer.
pub struct EventEmitter {
    writer: Mutex<BufWriter<Box<dyn Write + Send>>>,
    sequence: AtomicU64,
}

// Box<dyn Write> is not Debug.
impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("sequence", &self.sequence.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl EventEmitter {
    /// Creates an emitter that writes to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(BufWriter::new(writer)),
            sequence: AtomicU64::new(0),
        }
    }

    /// Creates an emitter that silently discards all events.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(Box::new(std::io::sink()))
    }

    /// Creates an emitter that appends to a file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or opened.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self::new(Box::new(file)))
    }

    /// Emits an event as a single JSONL line.
    ///
    /// Failures are dropped; a lost event never changes the run's outcome.
    pub fn emit(&self, event: Event) {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let envelope = EventEnvelope {
            sequence: seq,
            event,
        };

        if let Ok(mut w) = self.writer.lock() {
            if let Ok(line) = serde_json::to_string(&envelope) {
                let _ = writeln!(w, "{line}");
                let _ = w.flush();
            }
        }
    }

    /// Returns the number of events emitted so far.
    #[must_use]
    pub fn event_count(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
