//! The gallery content document: loading, section classification, persisting.
//!
//! The document is kept as a [`serde_json::Value`] tree rather than a fully
//! typed struct. The site editor owns the schema and adds fields freely, and
//! this tool must write back every key it does not understand, in the order it
//! found them (`serde_json`'s `preserve_order` feature). Typed access happens
//! through [`SectionKind`] and the small accessor helpers below.
//!
//! ```json
//! {
//!   "sections": [
//!     { "type": "gallery", "items": [{ "fileName": "a.jpg" }] },
//!     { "type": "galleryWithTags",
//!       "items": [{ "fileName": "b.jpg" }],
//!       "tags": [{ "name": "Ink", "items": [{ "fileName": "c.jpg" }] }] },
//!     { "type": "info", "imageId": "d.jpg" }
//!   ]
//! }
//! ```

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key holding the placeholder data URI on items and info sections.
pub const LQIP_KEY: &str = "lqip";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid data in {0}: sections must be an array")]
    MissingSections(PathBuf),
}

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Recognized section variants.
///
/// Anything else (including a missing `type`) is [`SectionKind::Other`]:
/// scanned, contributes nothing, written back untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Gallery,
    GalleryWithTags,
    Info,
    Other,
}

impl SectionKind {
    pub fn of(section: &Value) -> Self {
        match section.get("type").and_then(Value::as_str) {
            Some("gallery") => Self::Gallery,
            Some("galleryWithTags") => Self::GalleryWithTags,
            Some("info") => Self::Info,
            _ => Self::Other,
        }
    }
}

/// A parsed content document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Wrap an already-parsed JSON value. The root must be an object whose
    /// `sections` key is an array.
    pub fn from_value(root: Value) -> Option<Self> {
        root.get("sections")
            .is_some_and(Value::is_array)
            .then_some(Self { root })
    }

    /// Read and parse the document at `path`.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let root: Value = serde_json::from_str(&content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_value(root).ok_or_else(|| LoadError::MissingSections(path.to_path_buf()))
    }

    /// Pretty-print (two-space indent) and overwrite `path`.
    ///
    /// No trailing newline is written, so a document produced by the site's
    /// own tooling round-trips byte for byte.
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let json = self.to_pretty_string()?;
        std::fs::write(path, json).map_err(|source| PersistError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_pretty_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.root)
    }

    pub fn sections(&self) -> &[Value] {
        self.root
            .get("sections")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn sections_mut(&mut self) -> &mut [Value] {
        self.root
            .get_mut("sections")
            .and_then(Value::as_array_mut)
            .map(Vec::as_mut_slice)
            .unwrap_or_default()
    }

    pub fn into_value(self) -> Value {
        self.root
    }
}

/// A non-empty string field, or `None` if absent, empty, or not a string.
pub fn string_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Items of a section or tag. Missing or non-array `items` yields nothing.
pub fn items(owner: &Value) -> &[Value] {
    list(owner, "items")
}

pub fn items_mut(owner: &mut Value) -> &mut [Value] {
    list_mut(owner, "items")
}

/// Tags of a `galleryWithTags` section.
pub fn tags(section: &Value) -> &[Value] {
    list(section, "tags")
}

pub fn tags_mut(section: &mut Value) -> &mut [Value] {
    list_mut(section, "tags")
}

/// Set `lqip` on an object, appending the key if it was not there yet.
/// Non-object values are left alone.
pub fn set_lqip(target: &mut Value, uri: &str) -> bool {
    match target.as_object_mut() {
        Some(map) => {
            insert_string(map, LQIP_KEY, uri);
            true
        }
        None => false,
    }
}

fn insert_string(map: &mut Map<String, Value>, key: &str, value: &str) {
    map.insert(key.to_string(), Value::String(value.to_string()));
}

fn list<'a>(owner: &'a Value, key: &str) -> &'a [Value] {
    owner
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn list_mut<'a>(owner: &'a mut Value, key: &str) -> &'a mut [Value] {
    owner
        .get_mut(key)
        .and_then(Value::as_array_mut)
        .map(Vec::as_mut_slice)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn section_kind_classification() {
        assert_eq!(
            SectionKind::of(&json!({"type": "gallery"})),
            SectionKind::Gallery
        );
        assert_eq!(
            SectionKind::of(&json!({"type": "galleryWithTags"})),
            SectionKind::GalleryWithTags
        );
        assert_eq!(SectionKind::of(&json!({"type": "info"})), SectionKind::Info);
        assert_eq!(
            SectionKind::of(&json!({"type": "video"})),
            SectionKind::Other
        );
        assert_eq!(SectionKind::of(&json!({})), SectionKind::Other);
        assert_eq!(SectionKind::of(&json!({"type": 3})), SectionKind::Other);
    }

    #[test]
    fn from_value_requires_sections_array() {
        assert!(Document::from_value(json!({"sections": []})).is_some());
        assert!(Document::from_value(json!({"sections": {}})).is_none());
        assert!(Document::from_value(json!({})).is_none());
        assert!(Document::from_value(json!([1, 2])).is_none());
    }

    #[test]
    fn load_missing_file_errors() {
        let tmp = TempDir::new().unwrap();
        let result = Document::load(&tmp.path().join("nope.json"));
        assert!(matches!(result, Err(LoadError::Read { .. })));
    }

    #[test]
    fn load_invalid_json_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Document::load(&path), Err(LoadError::Parse { .. })));
    }

    #[test]
    fn load_without_sections_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        std::fs::write(&path, r#"{"title": "site"}"#).unwrap();
        assert!(matches!(
            Document::load(&path),
            Err(LoadError::MissingSections(_))
        ));
    }

    #[test]
    fn save_preserves_key_order_and_uses_two_space_indent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        let input = r#"{"zeta":1,"sections":[{"type":"gallery","title":"T","items":[]}],"alpha":2}"#;
        std::fs::write(&path, input).unwrap();

        let doc = Document::load(&path).unwrap();
        doc.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let expected = "{\n  \"zeta\": 1,\n  \"sections\": [\n    {\n      \"type\": \"gallery\",\n      \"title\": \"T\",\n      \"items\": []\n    }\n  ],\n  \"alpha\": 2\n}";
        assert_eq!(written, expected);
    }

    #[test]
    fn save_to_missing_directory_errors() {
        let tmp = TempDir::new().unwrap();
        let doc = Document::from_value(json!({"sections": []})).unwrap();
        let result = doc.save(&tmp.path().join("missing/dir/data.json"));
        assert!(matches!(result, Err(PersistError::Write { .. })));
    }

    #[test]
    fn string_field_ignores_empty_and_non_strings() {
        let item = json!({"a": "x.jpg", "b": "", "c": 7});
        assert_eq!(string_field(&item, "a"), Some("x.jpg"));
        assert_eq!(string_field(&item, "b"), None);
        assert_eq!(string_field(&item, "c"), None);
        assert_eq!(string_field(&item, "d"), None);
    }

    #[test]
    fn items_and_tags_tolerate_missing_lists() {
        let section = json!({"type": "galleryWithTags"});
        assert!(items(&section).is_empty());
        assert!(tags(&section).is_empty());

        let section = json!({"items": "oops"});
        assert!(items(&section).is_empty());
    }

    #[test]
    fn set_lqip_overwrites_in_place() {
        let mut item = json!({"fileName": "a.jpg", "lqip": "old", "alt": "x"});
        assert!(set_lqip(&mut item, "new"));
        assert_eq!(item["lqip"], "new");
        let keys: Vec<&String> = item.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["fileName", "lqip", "alt"]);
    }

    #[test]
    fn set_lqip_on_non_object_is_noop() {
        let mut item = json!("a.jpg");
        assert!(!set_lqip(&mut item, "uri"));
        assert_eq!(item, json!("a.jpg"));
    }
}
