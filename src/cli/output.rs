//! CLI output formatting

use crate::core::{SkippedTarget, TargetRelease, TargetVerdict};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");

/// Format a skipped target as a report line
pub fn format_skip(skipped: &SkippedTarget) -> String {
    format!("|- {}", style(skipped).yellow())
}

/// Format one resolved target as a report line
pub fn format_release(name: &str, release: &TargetRelease) -> String {
    format!(
        "|- Target '{}' has version {} and build number {}.",
        name, release.version, release.build
    )
}

/// Format one gate verdict as a report line
pub fn format_verdict(verdict: &TargetVerdict) -> String {
    if verdict.admissible {
        format!("|- Target '{}': {}", verdict.target, verdict.reason)
    } else {
        format!(
            "|- Target '{}': {}",
            verdict.target,
            style(&verdict.reason).yellow()
        )
    }
}
