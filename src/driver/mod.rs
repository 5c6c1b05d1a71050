//! Bomb driver
//!
//! Runs the six phases of a loaded bomb strictly in order, one input line
//! each, and stops at the first rejected line. After phase 6 the captured
//! phase 4 line is rescanned for the secret passphrase; when present the
//! secret phase runs before the final message.
//!
//! The driver writes the bomb's own messages to its output (stdout in the
//! binary) and reports every result to an [`EventEmitter`].

pub mod input;

use std::io::Write;

use chrono::Utc;

use crate::config::BombConfig;
use crate::error::{BombError, Explosion, InputError};
use crate::observability::{Event, EventEmitter, Notification, Status};
use crate::parse::{spells, trailing_word};
use crate::phase::{PHASE_COUNT, Phase};

use input::{InputLine, LineSource, TRUNCATED};

/// Phase number reported for the secret phase.
pub const SECRET_PHASE: usize = PHASE_COUNT + 1;

/// Line (zero-based) rescanned for the secret passphrase.
const PASSPHRASE_LINE: usize = 3;

const GREETING: &str = "Welcome to my fiendish little bomb. You have 6 phases with\n\
                        which to blow yourself up. Have a nice day!";

/// Message printed after each ordinary phase passes.
const PROGRESS: [&str; PHASE_COUNT - 1] = [
    "Phase 1 defused. How about the next one?",
    "That's number 2.  Keep going!",
    "Halfway there!",
    "So you got that one.  Try this one.",
    "Good work!  On to the next...",
];

/// Where a run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BombState {
    /// Waiting for the line of this one-based phase.
    Running(usize),
    /// A phase rejected its line.
    Exploded {
        /// Phase that rejected the line.
        phase: usize,
    },
    /// All six phases passed.
    Defused,
    /// All six phases passed and the passphrase was found.
    SecretUnlocked,
}

/// How a run that did not explode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Six phases passed without the passphrase.
    Defused,
    /// Six phases and the secret phase passed.
    SecretDefused,
    /// The answer file ran out while grading.
    Graded {
        /// Lines consumed before the file ended.
        lines: usize,
    },
}

/// Runs one bomb against one line source.
pub struct BombDriver<'a> {
    bomb: &'a BombConfig,
    input: &'a mut dyn LineSource,
    out: &'a mut dyn Write,
    events: &'a EventEmitter,
    lines: Vec<String>,
    state: BombState,
}

impl std::fmt::Debug for BombDriver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BombDriver")
            .field("bomb_id", &self.bomb.bomb_id)
            .field("lines", &self.lines.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'a> BombDriver<'a> {
    /// Creates a driver for `bomb` reading from `input`.
    #[must_use]
    pub fn new(
        bomb: &'a BombConfig,
        input: &'a mut dyn LineSource,
        out: &'a mut dyn Write,
        events: &'a EventEmitter,
    ) -> Self {
        Self {
            bomb,
            input,
            out,
            events,
            lines: Vec::with_capacity(SECRET_PHASE),
            state: BombState::Running(1),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> BombState {
        self.state
    }

    /// Every line consumed so far, in order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Runs the bomb to completion.
    ///
    /// # Errors
    ///
    /// Returns [`BombError::Exploded`] when a phase rejects its line,
    /// [`BombError::Input`] when input ends or fails before the run is
    /// over, and [`BombError::Io`] if the output cannot be written.
    pub fn run(&mut self) -> Result<Outcome, BombError> {
        self.events.emit(Event::BombStarted {
            timestamp: Utc::now(),
            bomb_id: self.bomb.bomb_id,
            phases: self.bomb.describe(),
        });
        writeln!(self.out, "{GREETING}")?;

        let bomb = self.bomb;
        for (i, variant) in bomb.phases.iter().enumerate() {
            let phase = i + 1;
            self.state = BombState::Running(phase);
            let Some(line) = self.next_line(phase)? else {
                return Ok(Outcome::Graded {
                    lines: self.lines.len(),
                });
            };
            self.check(phase, variant.as_phase(), &line)?;
            if let Some(message) = PROGRESS.get(i) {
                writeln!(self.out, "{message}")?;
            }
        }

        if self.passphrase_found() {
            self.state = BombState::SecretUnlocked;
            tracing::info!(bomb_id = self.bomb.bomb_id, "secret phase unlocked");
            self.events.emit(Event::SecretUnlocked {
                timestamp: Utc::now(),
                notification: self.notification(Status::Defused),
            });
            writeln!(self.out, "Curses, you've found the secret phase!")?;
            writeln!(self.out, "But finding it and solving it are quite different...")?;

            let Some(line) = self.next_line(SECRET_PHASE)? else {
                return Ok(Outcome::Graded {
                    lines: self.lines.len(),
                });
            };
            let secret_phase = bomb.secret_phase();
            self.check(SECRET_PHASE, &secret_phase, &line)?;
            writeln!(self.out, "Wow! You've defused the secret stage!")?;
        } else {
            self.state = BombState::Defused;
        }

        let secret = self.state == BombState::SecretUnlocked;
        writeln!(self.out, "Congratulations! You've defused the bomb!")?;
        self.events.emit(Event::BombDefused {
            timestamp: Utc::now(),
            secret,
            notification: self.notification(Status::Defused),
        });
        tracing::info!(bomb_id = self.bomb.bomb_id, secret, "bomb defused");

        Ok(if secret {
            Outcome::SecretDefused
        } else {
            Outcome::Defused
        })
    }

    /// Reads and records the next line; `None` ends a graded run.
    fn next_line(&mut self, phase: usize) -> Result<Option<String>, BombError> {
        match self.input.next_line(phase) {
            Ok(InputLine::Line(line)) => {
                self.lines.push(line.clone());
                Ok(Some(line))
            }
            Ok(InputLine::GradedEof) => {
                tracing::debug!(phase, "answer file ended while grading");
                Ok(None)
            }
            Ok(InputLine::TooLong) => {
                writeln!(self.out, "Error: Input line too long")?;
                self.lines.push(TRUNCATED.to_string());
                Err(self.explode(phase, Explosion::parse("input line too long"))?)
            }
            Err(e @ InputError::PrematureEof { .. }) => {
                writeln!(self.out, "Error: Premature EOF on stdin")?;
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn check(&mut self, phase: usize, validator: &dyn Phase, line: &str) -> Result<(), BombError> {
        tracing::debug!(phase, variant = validator.name(), "checking line");
        match validator.check(line) {
            Ok(()) => {
                self.events.emit(Event::PhaseDefused {
                    timestamp: Utc::now(),
                    phase,
                    notification: self.notification(Status::Defused),
                });
                Ok(())
            }
            Err(explosion) => Err(self.explode(phase, explosion)?),
        }
    }

    /// Prints the explosion and builds the error that ends the run.
    fn explode(&mut self, phase: usize, source: Explosion) -> Result<BombError, BombError> {
        self.state = BombState::Exploded { phase };
        tracing::warn!(phase, reason = %source, "bomb exploded");
        writeln!(self.out, "\nBOOM!!!\nThe bomb has blown up.")?;
        self.out.flush()?;
        self.events.emit(Event::BombExploded {
            timestamp: Utc::now(),
            phase,
            notification: self.notification(Status::Exploded),
        });
        Ok(BombError::Exploded { phase, source })
    }

    fn passphrase_found(&self) -> bool {
        self.lines.len() == PHASE_COUNT
            && self
                .lines
                .get(PASSPHRASE_LINE)
                .and_then(|line| trailing_word(line))
                .is_some_and(|word| spells(word, &self.bomb.secret_phrase))
    }

    fn notification(&self, status: Status) -> Notification {
        Notification {
            bomb_id: self.bomb.bomb_id,
            status,
            lines: self.lines.len(),
            last_line: self.lines.last().cloned().unwrap_or_default(),
        }
    }
}
