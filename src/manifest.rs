//! Access to the `version` field of the project's JSON manifest.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{ReleaseError, Result};
use crate::version::ReleaseVersion;

/// The project manifest (`package.json`) on disk.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
}

impl Manifest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Manifest { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current `version` field.
    ///
    /// # Returns
    /// * `Ok(String)` - The version text as stored, not validated
    /// * `Err(ManifestMissing)` - The file does not exist
    /// * `Err(ManifestCorrupt)` - The file is not a JSON object
    /// * `Err(ManifestFieldMissing)` - There is no string `version` field
    pub fn read(&self) -> Result<String> {
        let (document, _) = self.load()?;
        match document.get("version") {
            Some(Value::String(version)) => Ok(version.clone()),
            _ => Err(ReleaseError::ManifestFieldMissing(
                self.path.display().to_string(),
            )),
        }
    }

    /// Replaces the `version` field, leaving every other field in place.
    ///
    /// The document is re-serialized with 2-space indentation in its original
    /// key order. A trailing newline is kept when the file had one.
    pub fn write(&self, new_version: &ReleaseVersion) -> Result<()> {
        let (mut document, trailing_newline) = self.load()?;
        document.insert(
            "version".to_string(),
            Value::String(new_version.as_str().to_string()),
        );

        let mut output = serde_json::to_string_pretty(&Value::Object(document))
            .map_err(|e| ReleaseError::ManifestWrite(e.to_string()))?;
        if trailing_newline {
            output.push('\n');
        }

        // fs::write truncates whatever was longer than the new document
        fs::write(&self.path, output).map_err(|e| {
            ReleaseError::ManifestWrite(format!("{}: {}", self.path.display(), e))
        })?;

        log::debug!(
            "wrote version {} to {}",
            new_version,
            self.path.display()
        );
        Ok(())
    }

    fn load(&self) -> Result<(Map<String, Value>, bool)> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ReleaseError::ManifestMissing(self.path.display().to_string()),
            _ => ReleaseError::Io(e),
        })?;

        let value: Value = serde_json::from_str(&content).map_err(|e| {
            ReleaseError::ManifestCorrupt(format!("{}: {}", self.path.display(), e))
        })?;

        match value {
            Value::Object(map) => Ok((map, content.ends_with('\n'))),
            _ => Err(ReleaseError::ManifestCorrupt(format!(
                "{}: top level is not an object",
                self.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::validate;
    use tempfile::TempDir;

    fn manifest_with(content: &str) -> (TempDir, Manifest) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, content).unwrap();
        (dir, Manifest::new(path))
    }

    #[test]
    fn test_read_version() {
        let (_dir, manifest) = manifest_with(r#"{"name": "card", "version": "1.2.3"}"#);
        assert_eq!(manifest.read().unwrap(), "1.2.3");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::new(dir.path().join("package.json"));
        assert!(matches!(
            manifest.read(),
            Err(ReleaseError::ManifestMissing(_))
        ));
    }

    #[test]
    fn test_read_corrupt_json() {
        let (_dir, manifest) = manifest_with("{\"version\": ");
        assert!(matches!(
            manifest.read(),
            Err(ReleaseError::ManifestCorrupt(_))
        ));
    }

    #[test]
    fn test_read_non_object() {
        let (_dir, manifest) = manifest_with("[\"1.2.3\"]");
        assert!(matches!(
            manifest.read(),
            Err(ReleaseError::ManifestCorrupt(_))
        ));
    }

    #[test]
    fn test_read_field_missing() {
        let (_dir, manifest) = manifest_with(r#"{"name": "card"}"#);
        assert!(matches!(
            manifest.read(),
            Err(ReleaseError::ManifestFieldMissing(_))
        ));
    }

    #[test]
    fn test_read_non_string_version() {
        let (_dir, manifest) = manifest_with(r#"{"version": 3}"#);
        assert!(matches!(
            manifest.read(),
            Err(ReleaseError::ManifestFieldMissing(_))
        ));
    }

    #[test]
    fn test_write_uses_two_space_indent_and_keeps_order() {
        let (_dir, manifest) =
            manifest_with("{\"name\": \"card\", \"version\": \"1.2.3\", \"private\": true}\n");
        manifest.write(&validate("1.3.0").unwrap()).unwrap();

        let written = fs::read_to_string(manifest.path()).unwrap();
        assert_eq!(
            written,
            "{\n  \"name\": \"card\",\n  \"version\": \"1.3.0\",\n  \"private\": true\n}\n"
        );
    }

    #[test]
    fn test_write_truncates_longer_content() {
        let long = format!(
            "{{\"version\": \"1.2.3\", \"description\": \"{}\"}}",
            "x".repeat(10)
        );
        let (_dir, manifest) = manifest_with(&format!("{}{}", long, " ".repeat(200)));
        manifest.write(&validate("1.2.4").unwrap()).unwrap();

        let written = fs::read_to_string(manifest.path()).unwrap();
        assert!(written.ends_with('}'));
        let value: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["version"], "1.2.4");
    }

    #[test]
    fn test_write_to_read_only_file() {
        let (_dir, manifest) = manifest_with(r#"{"version": "1.2.3"}"#);
        let mut permissions = fs::metadata(manifest.path()).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(manifest.path(), permissions.clone()).unwrap();

        // privileged users can write regardless of permission bits
        let writable = fs::OpenOptions::new()
            .write(true)
            .open(manifest.path())
            .is_ok();

        let result = manifest.write(&validate("1.3.0").unwrap());

        #[allow(clippy::permissions_set_readonly_false)]
        permissions.set_readonly(false);
        fs::set_permissions(manifest.path(), permissions).unwrap();

        if writable {
            return;
        }
        match result {
            Err(ReleaseError::ManifestWrite(message)) => {
                assert!(message.contains("package.json"), "got: {}", message)
            }
            other => panic!("expected ManifestWrite, got {:?}", other),
        }
        assert_eq!(manifest.read().unwrap(), "1.2.3");
    }
}
