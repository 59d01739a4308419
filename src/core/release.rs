//! The persisted per-target release record

use serde::{Deserialize, Deserializer, Serialize};

/// Release metadata extracted for one build target
///
/// One record per surviving target, written to the snapshot document keyed
/// by target name and consumed unmodified by the release gate. The target
/// name itself lives in the document key, not in the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRelease {
    /// Application identifier on the distribution service
    #[serde(rename = "applicationId")]
    pub app_id: String,

    /// Marketing version string, e.g. "2.1.0"
    pub version: String,

    /// Build number; must strictly increase between uploads
    #[serde(deserialize_with = "build_number")]
    pub build: u64,
}

/// Accept the build number as either a JSON integer or a numeric string.
/// Bundle metadata carries it as a string, so older snapshot documents may
/// too; it is always written back as an integer.
fn build_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("build number '{}' is not an integer", s))
        }),
    }
}
