//! Repository origin verification
//!
//! An origin is the logical identity of a repository: its host plus its
//! path, independent of transport scheme or credentials.

mod comparator;
mod guard;

pub use comparator::{are_same_origin, OriginComparator};
pub use guard::{FaultKind, OriginFault, OriginGuard, VerificationOutcome};
