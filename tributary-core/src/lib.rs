//! Tributary Core - Commit discovery with remote-origin verification
//!
//! Before every poll of a repository's clone, Tributary proves that the
//! clone's remote still names the repository it was configured against.
//! Scheme, credential and port changes are tolerated; a different host or
//! repository path halts discovery for that repository until an operator
//! confirms the change.

pub mod config;
pub mod discovery;
pub mod error;
pub mod git;
pub mod origin;
pub mod remote;

pub use config::Config;
pub use discovery::{DiscoveryHandle, DiscoveryLoop, LoopStatus, PollPhase};
pub use error::{Error, Result};
pub use origin::{are_same_origin, OriginFault, OriginGuard, VerificationOutcome};
pub use remote::{ParseError, RemoteUri, Scheme};
