//! Release gate - decides whether candidate releases may ship

use crate::core::release::TargetRelease;
use crate::core::version::{MalformedVersion, Version};
use crate::distribution::{ReleaseLookup, RemoteRelease};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

/// Verdict for a single target
#[derive(Debug, Clone, Serialize)]
pub struct TargetVerdict {
    /// Target name from the snapshot document
    pub target: String,

    /// Whether this candidate may ship
    pub admissible: bool,

    /// The candidate release under evaluation
    pub candidate: TargetRelease,

    /// The latest published release, if the lookup succeeded
    pub published: Option<RemoteRelease>,

    /// One-line explanation of the verdict
    pub reason: String,
}

/// Aggregate outcome over every candidate
#[derive(Debug, Clone, Serialize)]
pub struct GateResult {
    /// Per-target verdicts, in snapshot order
    pub verdicts: Vec<TargetVerdict>,

    /// True iff every verdict is admissible
    pub passed: bool,
}

/// Admissibility rule over candidate and published releases
///
/// A candidate may ship when its version is at least the published version
/// and its build number is strictly greater. Version equality alone is not
/// enough: the same version is routinely re-released under a new build.
pub struct ReleaseGate;

impl ReleaseGate {
    /// Evaluate one candidate against the published release
    ///
    /// # Errors
    /// Returns `MalformedVersion` if either version string does not parse;
    /// an unparseable version is a fatal condition, not an inadmissible
    /// verdict.
    pub fn evaluate(
        target: &str,
        candidate: &TargetRelease,
        published: &RemoteRelease,
    ) -> Result<TargetVerdict, MalformedVersion> {
        let candidate_version = Version::parse(&candidate.version)?;
        let published_version = Version::parse(&published.version)?;

        let admissible =
            candidate_version >= published_version && candidate.build > published.build;

        let reason = if admissible {
            format!(
                "version {} (build {}) is ahead of published {} (build {})",
                candidate.version, candidate.build, published.version, published.build
            )
        } else {
            format!(
                "version {} (build {}) is not ahead of published {} (build {})",
                candidate.version, candidate.build, published.version, published.build
            )
        };

        debug!("Target {}: {}", target, reason);

        Ok(TargetVerdict {
            target: target.to_string(),
            admissible,
            candidate: candidate.clone(),
            published: Some(published.clone()),
            reason,
        })
    }

    /// Evaluate every candidate in snapshot order and aggregate the result
    ///
    /// A failed lookup makes that target inadmissible with its own
    /// diagnostic; it does not abort the evaluation of the remaining
    /// targets. A malformed version aborts the whole call.
    pub async fn evaluate_all(
        candidates: &IndexMap<String, TargetRelease>,
        lookup: &dyn ReleaseLookup,
    ) -> Result<GateResult, MalformedVersion> {
        let mut verdicts = Vec::with_capacity(candidates.len());

        for (name, candidate) in candidates {
            match lookup.latest_release(&candidate.app_id).await {
                Ok(published) => {
                    verdicts.push(Self::evaluate(name, candidate, &published)?);
                }
                Err(e) => {
                    warn!("Lookup failed for target {}: {}", name, e);
                    verdicts.push(TargetVerdict {
                        target: name.clone(),
                        admissible: false,
                        candidate: candidate.clone(),
                        published: None,
                        reason: format!("could not fetch the published release: {}", e),
                    });
                }
            }
        }

        let passed = verdicts.iter().all(|verdict| verdict.admissible);

        Ok(GateResult { verdicts, passed })
    }
}
