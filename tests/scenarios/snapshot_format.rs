//! Test: Snapshot Format - the on-disk document contract

use crate::helpers::*;
use indexmap::IndexMap;
use shipgate::core::{resolver, TargetRelease};
use shipgate::persistence::SnapshotStore;

/// The document is a pretty-printed JSON object keyed by target name
#[tokio::test]
async fn test_snapshot_document_shape() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("target-releases.json"));

    store
        .save(&releases(&[
            ("Zed", "9999zzzz", "3.0.0", 12),
            ("App", "1111aaaa", "2.1.0", 42),
        ]))
        .await
        .unwrap();

    let raw = tokio::fs::read_to_string(store.path()).await.unwrap();

    assert!(raw.contains("\"applicationId\""));
    assert!(raw.contains('\n'), "document should be pretty-printed");
    assert!(raw.ends_with('\n'));

    // Save order is preserved, not sorted
    let loaded: IndexMap<String, TargetRelease> = serde_json::from_str(&raw).unwrap();
    let names: Vec<_> = loaded.keys().cloned().collect();
    assert_eq!(names, vec!["Zed", "App"]);
}

/// Documents written with string build numbers still load
#[tokio::test]
async fn test_snapshot_accepts_string_builds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("target-releases.json");

    let doc = r#"{
  "App": {
    "applicationId": "1111aaaa",
    "version": "2.1.0",
    "build": "42"
  }
}"#;
    tokio::fs::write(&path, doc).await.unwrap();

    let store = SnapshotStore::new(path);
    let loaded = store.load().await.unwrap();

    assert_eq!(loaded.get("App").map(|r| r.build), Some(42));
}

/// A build number that is not an integer fails the load
#[tokio::test]
async fn test_snapshot_rejects_non_numeric_build() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("target-releases.json");

    let doc = r#"{
  "App": {
    "applicationId": "1111aaaa",
    "version": "2.1.0",
    "build": "7f"
  }
}"#;
    tokio::fs::write(&path, doc).await.unwrap();

    let store = SnapshotStore::new(path);
    assert!(store.load().await.is_err());
}

/// Resolving unchanged inputs twice writes byte-identical documents
#[tokio::test]
async fn test_snapshot_is_stable_across_runs() {
    let config = sample_config();

    let project = MockProject::new(&["App", "App Lite"], &["Release"])
        .with_infoplist("App", "Release", "App/Info.plist")
        .with_infoplist("App Lite", "Release", "App Lite/Info.plist");
    let bundles = MockBundles::new()
        .with_bundle("App/Info.plist", "2.1.0", "42")
        .with_bundle("App Lite/Info.plist", "1.0.3", "7");

    let dir = tempfile::tempdir().unwrap();
    let first_store = SnapshotStore::new(dir.path().join("first.json"));
    let second_store = SnapshotStore::new(dir.path().join("second.json"));

    let first = resolver::resolve(&config, &project, &bundles).await.unwrap();
    first_store.save(&first.releases).await.unwrap();

    let second = resolver::resolve(&config, &project, &bundles).await.unwrap();
    second_store.save(&second.releases).await.unwrap();

    let first_bytes = tokio::fs::read(first_store.path()).await.unwrap();
    let second_bytes = tokio::fs::read(second_store.path()).await.unwrap();
    assert_eq!(first_bytes, second_bytes);
}
