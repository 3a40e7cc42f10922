//! Content-addressed artifacts and the navigation index
//!
//! Every class serializes to one canonical JSON document whose filename
//! embeds a truncated checksum of its own bytes, so unchanged classes
//! keep their filenames across runs and the site can cache aggressively.
//! Writes are change-aware: byte-identical content is never rewritten.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checksum::Checksum;
use crate::decl::{ClassDecl, FieldDecl};
use crate::error::Result;
use crate::graph::ClassGraphView;

/// Replace anything outside the safe identifier set with `_`. Hex names
/// and ordinary identifiers pass through unchanged.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// URL slug for a class page
pub fn slug(name: &str) -> String {
    sanitize_name(name).to_lowercase()
}

/// Read-only mapping from class name to its published location, built
/// once per run after parsing completes. Backed by a BTreeMap so the
/// serialized `classIndex.json` has deterministic key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameIndex(BTreeMap<String, String>);

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index over all parsed classes
    pub fn from_classes(classes: &[ClassDecl]) -> Self {
        let mut index = Self::new();
        for class in classes {
            index.insert(&class.name, format!("/classes/{}", slug(&class.name)));
        }
        index
    }

    pub fn insert(&mut self, name: impl Into<String>, location: impl Into<String>) {
        self.0.insert(name.into(), location.into());
    }

    /// Published location for a class name, if it is a known class
    pub fn location_of(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The persisted unit: one class declaration combined with its computed
/// graph view. Field order here is the canonical serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub name: String,
    pub bases: Vec<String>,
    pub properties: Vec<FieldDecl>,
    pub ancestors: Vec<String>,
    pub descendants: Vec<String>,
    #[serde(rename = "directChildren")]
    pub direct_children: Vec<String>,
}

impl ArtifactRecord {
    pub fn new(class: &ClassDecl, view: ClassGraphView) -> Self {
        Self {
            name: class.name.clone(),
            bases: class.bases.clone(),
            properties: class.fields.clone(),
            ancestors: view.ancestors,
            descendants: view.descendants,
            direct_children: view.direct_children,
        }
    }

    /// Canonical serialization: stable key order, whitespace mode fixed
    /// by the pretty toggle
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Content-addressed filename: `<sanitized-name>.<hash12>.json`.
    /// The hash covers the exact serialized bytes written to disk.
    pub fn file_name(&self, json: &str) -> String {
        let checksum = Checksum::from_content(json);
        format!("{}.{}.json", sanitize_name(&self.name), checksum.short())
    }
}

/// One row of the navigation index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    /// Site-absolute artifact location, e.g. `/db/classes/Foo.abc123def456.json`
    pub file: String,
    pub bases: Vec<String>,
    #[serde(rename = "propCount")]
    pub prop_count: usize,
}

/// The navigation index consumed by the site sidebar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavIndex {
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub classes: Vec<IndexEntry>,
}

impl NavIndex {
    pub fn new(classes: Vec<IndexEntry>) -> Self {
        Self {
            generated_at: Utc::now(),
            total: classes.len(),
            classes,
        }
    }

    /// Equality ignoring the generation timestamp. Re-runs on unchanged
    /// input must not rewrite the index just to bump `generatedAt`.
    pub fn same_entries(&self, other: &NavIndex) -> bool {
        self.total == other.total && self.classes == other.classes
    }
}

/// Write `contents` to `path` unless the file already holds exactly those
/// bytes. Creates parent directories on demand. Returns whether a write
/// happened.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<bool> {
    if let Ok(previous) = fs::read_to_string(path) {
        if previous == contents {
            return Ok(false);
        }
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(name: &str) -> ArtifactRecord {
        ArtifactRecord {
            name: name.to_string(),
            bases: vec!["Base".to_string()],
            properties: vec![FieldDecl {
                name: "health".to_string(),
                field_type: "I32".to_string(),
                aux_key_type: "0x0".to_string(),
                aux_value_type: "0x0".to_string(),
                referenced_type: "0x0".to_string(),
            }],
            ancestors: vec!["Base".to_string()],
            descendants: vec![],
            direct_children: vec![],
        }
    }

    #[test]
    fn test_sanitize_keeps_identifiers_and_hex() {
        assert_eq!(sanitize_name("Champion"), "Champion");
        assert_eq!(sanitize_name("0x1A2B3C4D"), "0x1A2B3C4D");
        assert_eq!(sanitize_name("Weird name/type"), "Weird_name_type");
    }

    #[test]
    fn test_slug_is_lowercase() {
        assert_eq!(slug("0x1A2B3C4D"), "0x1a2b3c4d");
        assert_eq!(slug("SpellObject"), "spellobject");
    }

    #[test]
    fn test_record_serialization_key_order() {
        let json = record("Foo").to_json(false).unwrap();
        let name_pos = json.find("\"name\"").unwrap();
        let bases_pos = json.find("\"bases\"").unwrap();
        let props_pos = json.find("\"properties\"").unwrap();
        let children_pos = json.find("\"directChildren\"").unwrap();
        assert!(name_pos < bases_pos && bases_pos < props_pos && props_pos < children_pos);
        assert!(json.contains("\"ft\":\"I32\""));
    }

    #[test]
    fn test_file_name_embeds_hash() {
        let rec = record("Foo");
        let json = rec.to_json(false).unwrap();
        let file_name = rec.file_name(&json);
        assert!(file_name.starts_with("Foo."));
        assert!(file_name.ends_with(".json"));
        assert_eq!(file_name.len(), "Foo.".len() + 12 + ".json".len());
    }

    #[test]
    fn test_content_change_changes_file_name() {
        let rec1 = record("Foo");
        let mut rec2 = record("Foo");
        rec2.properties[0].field_type = "F32".to_string();
        let name1 = rec1.file_name(&rec1.to_json(false).unwrap());
        let name2 = rec2.file_name(&rec2.to_json(false).unwrap());
        assert_ne!(name1, name2);
    }

    #[test]
    fn test_write_if_changed_skips_identical() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out.json");
        assert!(write_if_changed(&path, "{}").unwrap());
        assert!(!write_if_changed(&path, "{}").unwrap());
        assert!(write_if_changed(&path, "{\"a\":1}").unwrap());
    }

    #[test]
    fn test_name_index_lookup() {
        let classes = vec![
            ClassDecl::new("Champion", vec![]),
            ClassDecl::new("0x1A2B3C4D", vec![]),
        ];
        let index = NameIndex::from_classes(&classes);
        assert_eq!(index.location_of("Champion"), Some("/classes/champion"));
        assert_eq!(
            index.location_of("0x1A2B3C4D"),
            Some("/classes/0x1a2b3c4d")
        );
        assert_eq!(index.location_of("Unknown"), None);
    }

    #[test]
    fn test_name_index_serializes_flat_and_sorted() {
        let mut index = NameIndex::new();
        index.insert("Zed", "/classes/zed");
        index.insert("Ahri", "/classes/ahri");
        let json = serde_json::to_string(&index).unwrap();
        assert_eq!(json, r#"{"Ahri":"/classes/ahri","Zed":"/classes/zed"}"#);
    }

    #[test]
    fn test_nav_index_same_entries_ignores_timestamp() {
        let entries = vec![IndexEntry {
            name: "Foo".to_string(),
            file: "/db/classes/Foo.aaa.json".to_string(),
            bases: vec![],
            prop_count: 1,
        }];
        let a = NavIndex::new(entries.clone());
        let mut b = NavIndex::new(entries);
        b.generated_at = a.generated_at + chrono::Duration::seconds(60);
        assert!(a.same_entries(&b));
    }
}
