//! Type-reference linking for rendered documentation
//!
//! Turns raw field-type strings into annotated HTML fragments: known
//! classes become links into the docs, primitives stay plain text (with a
//! tooltip description where we have one), and anything unresolved is
//! passed through untouched. Container syntax like `Map<Hash, Spell>` is
//! linked recursively.

use crate::artifact::NameIndex;
use crate::decl::{FieldDecl, ABSENT};

/// Type tags that never link to a class page, even if a class of the
/// same name happens to exist.
const PRIMITIVES: &[&str] = &[
    "Bool", "I8", "I16", "I32", "I64", "U8", "U16", "U32", "U64", "F32", "F64", "String", "Hash",
    "Link", "Embed", "Flag", "Vec2", "Vec3", "Vec4", "Color", ABSENT,
];

/// Tags whose `kh` slot carries the class they point at
const REFERENCE_CARRYING: &[&str] = &["Link", "Embed", "List", "List2", "Map", "Pointer"];

pub fn is_primitive(tag: &str) -> bool {
    PRIMITIVES.contains(&tag)
}

fn is_reference_carrying(tag: &str) -> bool {
    REFERENCE_CARRYING.contains(&tag)
}

/// Hover description for the primitives worth explaining
pub fn primitive_description(tag: &str) -> Option<&'static str> {
    let description = match tag {
        "Bool" => "boolean flag",
        "I8" => "8-bit signed integer",
        "I16" => "16-bit signed integer",
        "I32" => "32-bit signed integer",
        "I64" => "64-bit signed integer",
        "U8" => "8-bit unsigned integer",
        "U16" => "16-bit unsigned integer",
        "U32" => "32-bit unsigned integer",
        "U64" => "64-bit unsigned integer",
        "F32" => "32-bit float",
        "F64" => "64-bit float",
        "String" => "text string",
        "Hash" => "name hash",
        "Vec2" => "2-component vector",
        "Vec3" => "3-component vector",
        "Vec4" => "4-component vector",
        "Color" => "RGBA color",
        _ => return None,
    };
    Some(description)
}

/// Split generic parameters on top-level commas only, tracking bracket
/// depth so `Map<Hash, Effect>` nested inside an outer list doesn't split
/// the outer parameter list.
fn split_top_level(params: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, ch) in params.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(params[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let tail = params[start..].trim();
    if !tail.is_empty() {
        parts.push(tail);
    }
    parts
}

/// Render one bare tag: primitive, linked class, or plain unresolved text
fn link_bare(tag: &str, index: &NameIndex) -> String {
    if is_primitive(tag) {
        return match primitive_description(tag) {
            Some(description) => format!(
                r#"<span class="type-primitive" title="{}">{}</span>"#,
                description, tag
            ),
            None => tag.to_string(),
        };
    }
    match index.location_of(tag) {
        Some(location) => format!(r#"<a href="{}" class="type-link">{}</a>"#, location, tag),
        None => tag.to_string(),
    }
}

/// Parse and link a type expression recursively.
///
/// The absent sentinel yields an empty string. Container parameters are
/// rejoined with escaped angle brackets so the result embeds cleanly in
/// generated documents.
pub fn link_type(ty: &str, index: &NameIndex) -> String {
    if ty.is_empty() || ty == ABSENT {
        return String::new();
    }

    let (base, params) = match ty.find('<') {
        Some(open) if ty.ends_with('>') => (&ty[..open], Some(&ty[open + 1..ty.len() - 1])),
        Some(_) => return ty.to_string(),
        None => (ty, None),
    };
    if base.is_empty() || !base.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        // Not the documented shape; pass through untouched
        return ty.to_string();
    }

    let mut result = link_bare(base, index);
    if let Some(params) = params {
        let linked: Vec<String> = split_top_level(params)
            .into_iter()
            .map(|p| link_type(p, index))
            .collect();
        result.push_str("&lt;");
        result.push_str(&linked.join(", "));
        result.push_str("&gt;");
    }
    result
}

/// Compose the visible type chip for one field from its type tuple.
///
/// Precedence when several slots are populated at once:
/// 1. reference-carrying `ft` with a referenced type: `ft<kh>`, and
///    `Map` shows both key and referenced type;
/// 2. any referenced type, shown as a link one level deep;
/// 3. an aux value type alone: `ft<vt>`, unless `ft` already carries
///    its own parameter list;
/// 4. the bare tag.
pub fn type_chip(field: &FieldDecl, index: &NameIndex) -> String {
    let ft = field.field_type.as_str();
    let mut display = link_type(ft, index);

    if field.has_referenced_type() && is_reference_carrying(ft) {
        if ft == "Map" && field.aux_key_type != ABSENT {
            display = format!(
                "{}&lt;{}, {}&gt;",
                link_bare(ft, index),
                link_type(&field.aux_key_type, index),
                link_type(&field.referenced_type, index)
            );
        } else {
            display = format!(
                "{}&lt;{}&gt;",
                link_bare(ft, index),
                link_type(&field.referenced_type, index)
            );
        }
    } else if field.has_referenced_type() {
        display = format!(
            "{}&lt;{}&gt;",
            display,
            link_type(&field.referenced_type, index)
        );
    } else if field.has_aux_value_type() && !ft.contains('<') {
        display = format!(
            "{}&lt;{}&gt;",
            display,
            link_type(&field.aux_value_type, index)
        );
    }

    format!(r#"<span class="type-chip">{}</span>"#, display)
}

/// Standalone reference chip for a class name
pub fn ref_chip(name: &str, index: &NameIndex) -> String {
    match index.location_of(name) {
        Some(location) => format!(
            r#"<a href="{}" class="chip chip-link">{}</a>"#,
            location, name
        ),
        None => format!(r#"<span class="chip">{}</span>"#, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> NameIndex {
        let mut index = NameIndex::new();
        index.insert("Champion", "/classes/champion");
        index.insert("Spell", "/classes/spell");
        index.insert("Effect", "/classes/effect");
        index
    }

    fn field(ft: &str, kt: &str, vt: &str, kh: &str) -> FieldDecl {
        FieldDecl {
            name: "f".to_string(),
            field_type: ft.to_string(),
            aux_key_type: kt.to_string(),
            aux_value_type: vt.to_string(),
            referenced_type: kh.to_string(),
        }
    }

    #[test]
    fn test_sentinel_links_to_nothing() {
        assert_eq!(link_type("0x0", &index()), "");
        assert_eq!(link_type("", &index()), "");
    }

    #[test]
    fn test_primitive_not_linked_even_when_class_exists() {
        let mut idx = index();
        idx.insert("I32", "/classes/i32");
        let linked = link_type("I32", &idx);
        assert!(!linked.contains("<a "), "primitive was linked: {}", linked);
        assert!(linked.contains("32-bit signed integer"));
    }

    #[test]
    fn test_known_class_is_linked() {
        assert_eq!(
            link_type("Champion", &index()),
            r#"<a href="/classes/champion" class="type-link">Champion</a>"#
        );
    }

    #[test]
    fn test_unknown_tag_is_plain_text() {
        assert_eq!(link_type("MysteryType", &index()), "MysteryType");
        assert_eq!(link_type("0xABCDEF01", &index()), "0xABCDEF01");
    }

    #[test]
    fn test_container_links_parameters() {
        let linked = link_type("List<Spell>", &index());
        assert!(linked.starts_with("List&lt;"));
        assert!(linked.contains(r#"<a href="/classes/spell""#));
        assert!(linked.ends_with("&gt;"));
    }

    #[test]
    fn test_nested_commas_split_at_top_level_only() {
        let linked = link_type("Map<Hash, Map<Hash, Effect>>", &index());
        // The outer split must produce exactly two parts; the inner Map's
        // comma stays inside its own brackets.
        assert_eq!(linked.matches("Map").count(), 2);
        assert!(linked.contains(r#"<a href="/classes/effect""#));
        assert_eq!(split_top_level("Hash, Map<Hash, Effect>").len(), 2);
        assert_eq!(split_top_level("Map<Hash, Effect>").len(), 1);
    }

    #[test]
    fn test_chip_bare_tag_when_both_sentinels_absent() {
        let chip = type_chip(&field("I32", "0x0", "0x0", "0x0"), &index());
        assert_eq!(
            chip,
            r#"<span class="type-chip"><span class="type-primitive" title="32-bit signed integer">I32</span></span>"#
        );
    }

    #[test]
    fn test_chip_reference_carrying_wins() {
        // Both vt and kh populated: the referenced type must win
        let chip = type_chip(&field("Pointer", "0x0", "U32", "Spell"), &index());
        assert!(chip.contains("Pointer&lt;"));
        assert!(chip.contains(r#"<a href="/classes/spell""#));
        assert!(!chip.contains("U32"));
    }

    #[test]
    fn test_chip_map_shows_key_and_referenced_type() {
        let chip = type_chip(&field("Map", "Hash", "0x0", "Effect"), &index());
        assert!(chip.contains("Map&lt;"));
        assert!(chip.contains("Hash"));
        assert!(chip.contains(r#"<a href="/classes/effect""#));
    }

    #[test]
    fn test_chip_referenced_type_without_carrier_tag() {
        let chip = type_chip(&field("Struct", "0x0", "0x0", "Champion"), &index());
        assert!(chip.contains("Struct&lt;"));
        assert!(chip.contains(r#"<a href="/classes/champion""#));
    }

    #[test]
    fn test_chip_aux_value_type_alone() {
        let chip = type_chip(&field("List2", "8", "F32", "0x0"), &index());
        assert!(chip.contains("List2&lt;"));
        assert!(chip.contains("F32"));
    }

    #[test]
    fn test_ref_chip() {
        assert!(ref_chip("Champion", &index()).contains(r#"href="/classes/champion""#));
        assert!(ref_chip("Nope", &index()).starts_with(r#"<span class="chip">"#));
    }
}
