//! Version ordering for dot-separated release versions

use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Error returned when a version string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed version '{input}': component '{component}' is not a non-negative integer")]
pub struct MalformedVersion {
    /// The full string that failed to parse
    pub input: String,

    /// The offending dot-separated component
    pub component: String,
}

/// An ordered sequence of numeric components parsed from a dot-separated
/// string such as "2.10.1"
///
/// Ordering is numeric per component, so "2.10" sorts above "2.9". When two
/// sequences differ in length the shorter one is padded with zero components,
/// making "1.2" equal to "1.2.0".
#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<u64>,
}

impl Version {
    /// Parse a dot-separated version string
    ///
    /// Every component must be a base-10 non-negative integer; anything else
    /// (letters, signs, whitespace, empty components) is rejected.
    pub fn parse(input: &str) -> Result<Self, MalformedVersion> {
        let mut components = Vec::new();
        for part in input.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(MalformedVersion {
                    input: input.to_string(),
                    component: part.to_string(),
                });
            }
            let value = part.parse::<u64>().map_err(|_| MalformedVersion {
                input: input.to_string(),
                component: part.to_string(),
            })?;
            components.push(value);
        }
        Ok(Self { components })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self
            .components
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", formatted)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality must agree with the padded ordering, so it cannot be derived
// from the component vector.
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}
