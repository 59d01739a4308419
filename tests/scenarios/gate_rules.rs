//! Test: Gate Rules - admissibility over candidate and published releases

use crate::helpers::*;
use shipgate::core::ReleaseGate;

/// Every candidate ahead of its published release passes the gate
#[tokio::test]
async fn test_gate_passes_when_all_targets_are_ahead() {
    let candidates = releases(&[
        ("App", "1111aaaa", "2.1.0", 42),
        ("App Lite", "2222bbbb", "1.0.3", 7),
    ]);

    let lookup = MockLookup::new()
        .with_release("1111aaaa", "2.1.0", 41)
        .with_release("2222bbbb", "1.0.2", 6);

    let result = ReleaseGate::evaluate_all(&candidates, &lookup).await.unwrap();

    assert!(result.passed);
    assert_eq!(result.verdicts.len(), 2);
    assert!(result.verdicts.iter().all(|v| v.admissible));
    assert_eq!(lookup.calls(), 2);

    // Verdicts come back in snapshot order
    let names: Vec<_> = result.verdicts.iter().map(|v| v.target.as_str()).collect();
    assert_eq!(names, vec!["App", "App Lite"]);
}

/// One target behind the published release fails the whole gate
#[tokio::test]
async fn test_gate_fails_when_one_target_is_behind() {
    let candidates = releases(&[
        ("App", "1111aaaa", "2.1.0", 42),
        ("App Lite", "2222bbbb", "1.0.3", 7),
    ]);

    let lookup = MockLookup::new()
        .with_release("1111aaaa", "2.1.0", 41)
        .with_release("2222bbbb", "1.0.3", 7);

    let result = ReleaseGate::evaluate_all(&candidates, &lookup).await.unwrap();

    assert!(!result.passed);
    assert!(result.verdicts[0].admissible);
    assert!(!result.verdicts[1].admissible);
    assert!(result.verdicts[1].reason.contains("not ahead"));
}

/// Version components compare numerically, not lexically
#[tokio::test]
async fn test_gate_compares_versions_numerically() {
    let candidates = releases(&[("App", "1111aaaa", "2.10.0", 3)]);
    let lookup = MockLookup::new().with_release("1111aaaa", "2.9.9", 2);

    let result = ReleaseGate::evaluate_all(&candidates, &lookup).await.unwrap();
    assert!(result.passed);
}

/// Shorter versions are padded with zeroes before comparing
#[tokio::test]
async fn test_gate_pads_shorter_versions() {
    let candidates = releases(&[("App", "1111aaaa", "1.2", 5)]);
    let lookup = MockLookup::new().with_release("1111aaaa", "1.2.0", 4);

    let result = ReleaseGate::evaluate_all(&candidates, &lookup).await.unwrap();
    assert!(result.passed, "1.2 and 1.2.0 must compare equal");
}

/// A failed lookup is an inadmissible verdict, not an abort
#[tokio::test]
async fn test_gate_keeps_going_past_a_failed_lookup() {
    let candidates = releases(&[
        ("App", "1111aaaa", "2.1.0", 42),
        ("App Lite", "2222bbbb", "1.0.3", 7),
    ]);

    let lookup = MockLookup::new()
        .with_error("1111aaaa", "connection reset")
        .with_release("2222bbbb", "1.0.2", 6);

    let result = ReleaseGate::evaluate_all(&candidates, &lookup).await.unwrap();

    assert!(!result.passed);
    assert_eq!(result.verdicts.len(), 2);
    assert_eq!(lookup.calls(), 2);

    let failed = &result.verdicts[0];
    assert!(!failed.admissible);
    assert!(failed.published.is_none());
    assert!(failed.reason.contains("could not fetch the published release"));
    assert!(failed.reason.contains("connection reset"));

    assert!(result.verdicts[1].admissible);
}

/// An application unknown to the service is inadmissible with its own note
#[tokio::test]
async fn test_gate_flags_unknown_application() {
    let candidates = releases(&[("App", "gone", "2.1.0", 42)]);
    let lookup = MockLookup::new();

    let result = ReleaseGate::evaluate_all(&candidates, &lookup).await.unwrap();

    assert!(!result.passed);
    assert!(result.verdicts[0].reason.contains("gone"));
}

/// A snapshot with an unparseable version aborts verification
#[tokio::test]
async fn test_gate_aborts_on_malformed_snapshot_version() {
    let candidates = releases(&[("App", "1111aaaa", "two.point.one", 42)]);
    let lookup = MockLookup::new().with_release("1111aaaa", "2.1.0", 41);

    let result = ReleaseGate::evaluate_all(&candidates, &lookup).await;
    assert!(result.is_err());
}

/// The serialized result names both compared pairs per target
#[tokio::test]
async fn test_gate_result_serializes_both_pairs() {
    let candidates = releases(&[("App", "1111aaaa", "2.1.0", 42)]);
    let lookup = MockLookup::new().with_release("1111aaaa", "2.1.0", 41);

    let result = ReleaseGate::evaluate_all(&candidates, &lookup).await.unwrap();
    let doc = serde_json::to_value(&result).unwrap();

    assert_eq!(doc["passed"], serde_json::json!(true));
    let verdict = &doc["verdicts"][0];
    assert_eq!(verdict["target"], serde_json::json!("App"));
    assert_eq!(verdict["candidate"]["applicationId"], serde_json::json!("1111aaaa"));
    assert_eq!(verdict["candidate"]["build"], serde_json::json!(42));
    assert_eq!(verdict["published"]["build"], serde_json::json!(41));
}
