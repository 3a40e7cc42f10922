//! Parsed schema declarations
//!
//! The input format is a Python-looking text file describing the game's
//! binary object model. Class and field names may be resolved identifiers
//! or raw hex hashes (`0x...`) when the reversing effort has not named
//! them yet. Both are carried through verbatim.

use serde::{Deserialize, Serialize};

/// Sentinel for "no type here" in a field tuple
pub const ABSENT: &str = "0x0";

/// One typed member of a class, as declared in the source tuple
/// `Name: (ft, kt, vt, kh)`.
///
/// All five components are always present; absence is the `0x0` sentinel,
/// never a missing key. The short wire names match the artifact format the
/// documentation site consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Resolved field name or raw hex hash
    pub name: String,
    /// Primary type tag (Bool, I32, List2, Pointer, Map, ...)
    #[serde(rename = "ft")]
    pub field_type: String,
    /// Aux key type: container size or Map key type, `0x0` when unused
    #[serde(rename = "kt")]
    pub aux_key_type: String,
    /// Aux value type: container/Map value type, `0x0` when unused
    #[serde(rename = "vt")]
    pub aux_value_type: String,
    /// Referenced class/type, `0x0` when unused
    #[serde(rename = "kh")]
    pub referenced_type: String,
}

impl FieldDecl {
    pub fn has_referenced_type(&self) -> bool {
        self.referenced_type != ABSENT
    }

    pub fn has_aux_value_type(&self) -> bool {
        self.aux_value_type != ABSENT
    }
}

/// One parsed class: a name, zero or more base names, and an ordered
/// field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    /// Resolved type name or raw hex hash
    pub name: String,
    /// Direct parent names, in source order
    pub bases: Vec<String>,
    /// Fields in source order
    #[serde(rename = "properties")]
    pub fields: Vec<FieldDecl>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>, bases: Vec<String>) -> Self {
        Self {
            name: name.into(),
            bases,
            fields: Vec::new(),
        }
    }

    /// Whether the class name is an unresolved hex hash
    pub fn is_hex_named(&self) -> bool {
        self.name.starts_with("0x")
    }

    /// Human-facing title: hex-named classes get a generic prefix
    pub fn display_name(&self) -> String {
        if self.is_hex_named() {
            format!("Class {}", self.name)
        } else {
            self.name.clone()
        }
    }
}
