//! Verify-else-refuse decision for one poll cycle
//!
//! [`OriginGuard::verify`] is a pure function over two already-fetched
//! remote strings. It returns `Ok` only when both parse and name the same
//! origin; every other case is an [`OriginFault`] the caller has to handle.

use std::fmt;

use serde::Serialize;

use super::comparator::OriginComparator;
use crate::remote::{self, RemoteUri};

/// Result of one equivalence check
///
/// The raw strings have any password masked; they are safe to log or
/// serialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    pub is_same_origin: bool,
    pub reason: String,
    pub context: String,
    pub configured_raw: String,
    pub observed_raw: String,
    pub configured: Option<RemoteUri>,
    pub observed: Option<RemoteUri>,
}

impl VerificationOutcome {
    /// The observed remote, when verification passed
    pub fn verified(&self) -> Option<&RemoteUri> {
        if self.is_same_origin {
            self.observed.as_ref()
        } else {
            None
        }
    }

    /// Take the observed remote out of a passing outcome
    pub fn into_verified(self) -> Option<RemoteUri> {
        if self.is_same_origin {
            self.observed
        } else {
            None
        }
    }
}

/// Why a verification failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// Both remotes parsed but name different repositories
    OriginChanged,
    /// The configured remote matched no supported dialect
    UnparseableConfigured,
    /// The live remote read from the clone matched no supported dialect
    UnparseableObserved,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FaultKind::OriginChanged => "origin changed",
            FaultKind::UnparseableConfigured => "unparseable configured remote",
            FaultKind::UnparseableObserved => "unparseable observed remote",
        };
        f.write_str(s)
    }
}

/// A failed verification; fatal to the poll cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OriginFault {
    pub kind: FaultKind,
    pub outcome: VerificationOutcome,
}

impl fmt::Display for OriginFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.outcome.reason)
    }
}

impl std::error::Error for OriginFault {}

impl OriginFault {
    pub fn reason(&self) -> &str {
        &self.outcome.reason
    }

    pub fn context(&self) -> &str {
        &self.outcome.context
    }
}

/// Decides whether a poll cycle may proceed to ingestion
#[derive(Debug, Clone, Default)]
pub struct OriginGuard {
    comparator: OriginComparator,
}

impl OriginGuard {
    pub fn new(comparator: OriginComparator) -> Self {
        Self { comparator }
    }

    /// Guard using strict host and path equality
    pub fn strict() -> Self {
        Self::default()
    }

    /// Check that `observed_raw` is still the repository `configured_raw` names
    ///
    /// `context` labels the repository or poll cycle in fault messages and
    /// plays no part in the decision.
    pub fn verify(
        &self,
        configured_raw: &str,
        observed_raw: &str,
        context: &str,
    ) -> Result<VerificationOutcome, OriginFault> {
        let configured = remote::parse(configured_raw);
        let observed = remote::parse(observed_raw);

        let fail = |kind: FaultKind,
                    reason: String,
                    configured: Option<RemoteUri>,
                    observed: Option<RemoteUri>| OriginFault {
            kind,
            outcome: VerificationOutcome {
                is_same_origin: false,
                reason,
                context: context.to_string(),
                configured_raw: remote::redact(configured_raw),
                observed_raw: remote::redact(observed_raw),
                configured,
                observed,
            },
        };

        let configured = match configured {
            Ok(uri) => uri,
            Err(e) => {
                return Err(fail(
                    FaultKind::UnparseableConfigured,
                    format!("{} {}: {}", FaultKind::UnparseableConfigured, context, e),
                    None,
                    observed.ok(),
                ));
            }
        };

        let observed = match observed {
            Ok(uri) => uri,
            Err(e) => {
                return Err(fail(
                    FaultKind::UnparseableObserved,
                    format!("{} {}: {}", FaultKind::UnparseableObserved, context, e),
                    Some(configured),
                    None,
                ));
            }
        };

        if !self.comparator.are_same_origin(&configured, &observed) {
            let reason = format!(
                "{} {}: configured '{}' ({}) but clone reports '{}' ({})",
                FaultKind::OriginChanged,
                context,
                configured.raw(),
                configured.identity(),
                observed.raw(),
                observed.identity(),
            );
            return Err(fail(
                FaultKind::OriginChanged,
                reason,
                Some(configured),
                Some(observed),
            ));
        }

        tracing::debug!(
            context,
            identity = %observed.identity(),
            "Remote origin verified"
        );

        Ok(VerificationOutcome {
            is_same_origin: true,
            reason: format!("same origin {}", observed.identity()),
            context: context.to_string(),
            configured_raw: remote::redact(configured_raw),
            observed_raw: remote::redact(observed_raw),
            configured: Some(configured),
            observed: Some(observed),
        })
    }
}
