//! Persistence for the raw configuration document.

// Standard library
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

// External crates
use serde_yaml_ng::{Mapping, Value};
use tracing::debug;
use uber_core::error::{Result, UberError};

// Internal imports
use crate::raw::RawDocument;

/// Reads and writes the raw document.
///
/// No locking is attempted: the last writer wins, and edits made by someone
/// else between `read` and `write` are overwritten.
pub trait DocumentStore {
    /// Where the document lives, for messages and permission changes.
    fn location(&self) -> &Path;
    fn exists(&self) -> bool;
    fn read(&self) -> Result<RawDocument>;
    fn write(&self, document: &RawDocument) -> Result<()>;
}

/// YAML file on disk.
#[derive(Debug, Clone)]
pub struct YamlFileStore {
    path: PathBuf,
}

impl YamlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentStore for YamlFileStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn read(&self) -> Result<RawDocument> {
        debug!(path = %self.path.display(), "reading configuration document");
        let contents =
            fs::read_to_string(&self.path).map_err(|e| UberError::persistence(&self.path, e))?;
        parse_document(&contents).map_err(|e| UberError::persistence(&self.path, e))
    }

    /// Write through a temporary file in the same directory so a failed write
    /// leaves the previous document in place.
    fn write(&self, document: &RawDocument) -> Result<()> {
        let yaml = render_document(document)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp_file = tempfile::Builder::new()
            .prefix(".uberstead-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| UberError::persistence(&self.path, e))?;

        temp_file
            .write_all(yaml.as_bytes())
            .map_err(|e| UberError::persistence(&self.path, e))?;

        temp_file
            .persist(&self.path)
            .map_err(|e| UberError::persistence(&self.path, e.error))?;

        debug!(path = %self.path.display(), bytes = yaml.len(), "wrote configuration document");
        Ok(())
    }
}

/// Parse document text. An empty document is an empty mapping.
pub fn parse_document(contents: &str) -> Result<RawDocument> {
    match serde_yaml_ng::from_str::<Value>(contents)? {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(UberError::Serialization(
            "the configuration document must be a mapping at the top level".to_string(),
        )),
    }
}

/// Render a document as block-style YAML, keys in insertion order.
pub fn render_document(document: &RawDocument) -> Result<String> {
    Ok(serde_yaml_ng::to_string(document)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_empty_and_null() {
        assert!(parse_document("").unwrap().is_empty());
        assert!(parse_document("~\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_document_rejects_non_mapping() {
        let err = parse_document("- a\n- b\n").unwrap_err();
        assert!(matches!(err, UberError::Serialization(_)));
        assert!(parse_document("ip: [unclosed").is_err());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = YamlFileStore::new(dir.path().join("uberstead.yaml"));
        assert!(!store.exists());

        let document = parse_document("ip: 10.0.0.5\nmemory: 2048\nsites: []\n").unwrap();
        store.write(&document).unwrap();

        assert!(store.exists());
        assert_eq!(store.read().unwrap(), document);
        let text = fs::read_to_string(store.location()).unwrap();
        assert!(text.starts_with("ip: "));
        assert!(text.contains("memory: 2048\n"));
        assert!(text.ends_with("sites: []\n"));
    }

    #[test]
    fn test_write_replaces_existing_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uberstead.yaml");
        fs::write(&path, "owner: first\n").unwrap();

        let store = YamlFileStore::new(&path);
        store
            .write(&parse_document("owner: second\n").unwrap())
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "owner: second\n");

        // no temporary files are left behind
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_failed_write_is_persistence_error() {
        let store = YamlFileStore::new("/definitely/not/here/uberstead.yaml");
        let err = store.write(&Mapping::new()).unwrap_err();
        assert!(matches!(err, UberError::Persistence { .. }));
    }

    #[test]
    fn test_read_missing_file_is_persistence_error() {
        let store = YamlFileStore::new("/definitely/not/here/uberstead.yaml");
        assert!(!store.exists());
        assert!(matches!(
            store.read().unwrap_err(),
            UberError::Persistence { .. }
        ));
    }
}
