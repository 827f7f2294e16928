use card_release::manifest::Manifest;
use card_release::version::validate;
use card_release::ReleaseError;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;

#[test]
fn test_write_preserves_other_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("package.json");
    fs::write(&path, r#"{"version": "1.2.3", "other": "x"}"#).unwrap();

    let manifest = Manifest::new(&path);
    manifest.write(&validate("1.3.0").unwrap()).unwrap();

    let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value, json!({"version": "1.3.0", "other": "x"}));
    assert_eq!(manifest.read().unwrap(), "1.3.0");
}

#[test]
fn test_write_keeps_nested_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("package.json");
    let original = json!({
        "name": "hyper-light-card",
        "version": "0.9.0",
        "scripts": {"build": "rollup -c", "test": "jest"},
        "devDependencies": {"rollup": "^4.0.0"},
        "files": ["dist"]
    });
    fs::write(&path, serde_json::to_string_pretty(&original).unwrap()).unwrap();

    Manifest::new(&path)
        .write(&validate("1.0.0-beta.1").unwrap())
        .unwrap();

    let mut expected = original.clone();
    expected["version"] = json!("1.0.0-beta.1");
    let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, expected);
}

#[test]
fn test_missing_manifest_is_not_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("package.json");
    let manifest = Manifest::new(&path);

    assert!(matches!(manifest.read(), Err(ReleaseError::ManifestMissing(_))));
    assert!(matches!(
        manifest.write(&validate("1.0.0").unwrap()),
        Err(ReleaseError::ManifestMissing(_))
    ));
    assert!(!path.exists());
}

#[test]
fn test_write_keeps_number_text_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("package.json");
    fs::write(
        &path,
        r#"{"version": "1.0.0", "id": 123456789012345678901234567890, "ratio": 1.50}"#,
    )
    .unwrap();

    let manifest = Manifest::new(&path);
    manifest.write(&validate("1.1.0").unwrap()).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(
        written.contains("\"id\": 123456789012345678901234567890"),
        "got: {}",
        written
    );
    assert!(written.contains("\"ratio\": 1.50"), "got: {}", written);
    assert_eq!(manifest.read().unwrap(), "1.1.0");
}
