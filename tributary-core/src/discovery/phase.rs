//! Poll cycle phases and per-repository cycle state

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::{Error, Result};

/// Phase of one repository's discovery loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PollPhase {
    /// Waiting for the next tick or trigger
    #[default]
    Idle,
    /// Reading the live remote from the local clone
    Polling,
    /// Comparing the live remote against the configured one
    Verifying,
    /// Handing the verified remote to the ingestion pipeline
    Ingesting,
    /// Stopped on an origin fault until an operator intervenes
    Halted,
}

impl PollPhase {
    /// Check if a transition to the given phase is valid
    ///
    /// `Polling -> Idle` and `Verifying -> Idle` cover lookup failures and
    /// stop requests. `Halted -> Idle` is only taken on operator resume.
    pub fn can_transition_to(&self, next: PollPhase) -> bool {
        use PollPhase::*;
        matches!(
            (self, next),
            (Idle, Polling)
                | (Polling, Verifying)
                | (Polling, Idle)
                | (Verifying, Ingesting)
                | (Verifying, Halted)
                | (Verifying, Idle)
                | (Ingesting, Idle)
                | (Halted, Idle)
        )
    }

    /// Whether a poll cycle is in flight
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            PollPhase::Polling | PollPhase::Verifying | PollPhase::Ingesting
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PollPhase::Idle => "idle",
            PollPhase::Polling => "polling",
            PollPhase::Verifying => "verifying",
            PollPhase::Ingesting => "ingesting",
            PollPhase::Halted => "halted",
        }
    }
}

impl fmt::Display for PollPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State owned by a single discovery loop
#[derive(Debug, Clone)]
pub struct PollCycleState {
    pub phase: PollPhase,
    /// Completion time of the last successful ingestion
    pub last_poll_time: Option<DateTime<Utc>>,
    /// When the next cycle starts without a trigger
    pub next_poll_deadline: Instant,
    pub consecutive_failure_count: u32,
    pub halted_reason: Option<String>,
    /// Number of cycles started
    pub cycle: u64,
}

impl PollCycleState {
    /// Fresh state that polls immediately
    pub fn new() -> Self {
        Self {
            phase: PollPhase::Idle,
            last_poll_time: None,
            next_poll_deadline: Instant::now(),
            consecutive_failure_count: 0,
            halted_reason: None,
            cycle: 0,
        }
    }

    /// Move to a new phase, rejecting transitions the loop never makes
    pub fn transition_to(&mut self, next: PollPhase) -> Result<()> {
        if !self.phase.can_transition_to(next) {
            return Err(Error::Other(format!(
                "Invalid poll phase transition from {} to {}",
                self.phase, next
            )));
        }

        tracing::trace!(from = %self.phase, to = %next, "Poll phase transition");
        self.phase = next;
        Ok(())
    }
}

impl Default for PollCycleState {
    fn default() -> Self {
        Self::new()
    }
}
