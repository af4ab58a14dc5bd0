//! Commit discovery
//!
//! One [`DiscoveryLoop`] runs per repository:
//! `Idle -> Polling -> Verifying -> Ingesting -> Idle`, or
//! `Verifying -> Halted` when the clone no longer points at the configured
//! origin. Loops for different repositories share no state.

mod phase;
mod pipeline;
mod retry;
mod runner;

pub use phase::{PollCycleState, PollPhase};
pub use pipeline::{
    CommandIngestor, CommitIngestor, FaultReporter, LoggingIngestor, RepositoryHandle,
    TracingFaultReporter,
};
pub use retry::RetryPolicy;
pub use runner::{DiscoveryHandle, DiscoveryLoop, LoopStatus};
