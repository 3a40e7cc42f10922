//! Mermaid inheritance diagrams
//!
//! Diagrams show direct relationships only: the class itself, its bases
//! above, its direct children below. Transitive ancestry stays in the
//! per-class JSON, and children beyond a fixed cap collapse into a
//! single placeholder node.

use crate::artifact::NameIndex;

/// Direct children shown before collapsing into a placeholder
pub const MAX_CHILDREN_IN_DIAGRAM: usize = 8;

/// Mermaid node ids must be alphanumeric; labels keep the real name
fn mermaid_safe(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

fn node(name: &str, is_current: bool) -> String {
    let safe_id = mermaid_safe(name);
    if is_current {
        format!(r#"{}["<b>{}</b><br/><i>current</i>"]:::current"#, safe_id, name)
    } else {
        format!(r#"{}["{}"]"#, safe_id, name)
    }
}

/// Generate a Mermaid inheritance diagram for one class.
///
/// Returns an empty string when the class has neither bases nor direct
/// children. Every node other than the current class gets a `click`
/// navigation line when its location is known.
pub fn inheritance_diagram(
    name: &str,
    bases: &[String],
    direct_children: &[String],
    index: &NameIndex,
) -> String {
    if bases.is_empty() && direct_children.is_empty() {
        return String::new();
    }

    let shown_children = &direct_children[..direct_children.len().min(MAX_CHILDREN_IN_DIAGRAM)];
    let hidden_count = direct_children.len() - shown_children.len();

    let current_safe = mermaid_safe(name);
    let mut lines = vec!["flowchart TB".to_string()];
    let mut processed = vec![name.to_string()];

    lines.push(format!("  {}", node(name, true)));

    for base in bases {
        if !processed.contains(base) {
            lines.push(format!("  {}", node(base, false)));
            processed.push(base.clone());
        }
        lines.push(format!("  {} --> {}", mermaid_safe(base), current_safe));
    }

    for child in shown_children {
        if !processed.contains(child) {
            lines.push(format!("  {}", node(child, false)));
            processed.push(child.clone());
        }
        lines.push(format!("  {} --> {}", current_safe, mermaid_safe(child)));
    }

    if hidden_count > 0 {
        lines.push(format!(r#"  more["... and {} more"]:::more"#, hidden_count));
        lines.push(format!("  {} -.-> more", current_safe));
    }

    for node_name in &processed {
        if node_name == name {
            continue;
        }
        if let Some(location) = index.location_of(node_name) {
            lines.push(format!(
                r#"  click {} href "{}" "View {}""#,
                mermaid_safe(node_name),
                location,
                node_name
            ));
        }
    }

    lines.push(
        "  classDef current fill:#4f46e5,stroke:#3730a3,stroke-width:3px,color:#fff,font-weight:bold"
            .to_string(),
    );
    lines.push(
        "  classDef more fill:transparent,stroke:#9ca3af,stroke-dasharray:5 5,color:#6b7280"
            .to_string(),
    );

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> NameIndex {
        let mut index = NameIndex::new();
        for name in ["Base", "Child1", "Child2", "0x1A2B3C4D"] {
            index.insert(name, format!("/classes/{}", name.to_lowercase()));
        }
        index
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_relationships_yields_empty() {
        assert_eq!(inheritance_diagram("Lonely", &[], &[], &index()), "");
    }

    #[test]
    fn test_base_and_child_edges() {
        let diagram =
            inheritance_diagram("Mid", &strings(&["Base"]), &strings(&["Child1"]), &index());
        assert!(diagram.starts_with("flowchart TB"));
        assert!(diagram.contains("Base --> Mid"));
        assert!(diagram.contains("Mid --> Child1"));
        assert!(diagram.contains(r#"<b>Mid</b>"#));
        assert!(diagram.contains(r#"click Base href "/classes/base""#));
        assert!(diagram.contains(r#"click Child1 href "/classes/child1""#));
        // Current class never gets a click line
        assert!(!diagram.contains("click Mid"));
    }

    #[test]
    fn test_children_beyond_cap_collapse() {
        let children: Vec<String> = (0..12).map(|i| format!("Child{}", i)).collect();
        let diagram = inheritance_diagram("Busy", &[], &children, &index());
        assert!(diagram.contains(r#"more["... and 4 more"]:::more"#));
        assert!(diagram.contains("Busy -.-> more"));
        assert!(diagram.contains("Busy --> Child7"));
        assert!(!diagram.contains("Busy --> Child8"));
    }

    #[test]
    fn test_hex_node_id_sanitized_label_kept() {
        let diagram = inheritance_diagram("Foo", &strings(&["0x1A2B3C4D"]), &[], &index());
        assert!(diagram.contains(r#"0x1A2B3C4D["0x1A2B3C4D"]"#));
        assert!(diagram.contains("0x1A2B3C4D --> Foo"));
    }

    #[test]
    fn test_unknown_node_gets_no_click() {
        let diagram = inheritance_diagram("Foo", &strings(&["Phantom"]), &[], &index());
        assert!(diagram.contains("Phantom --> Foo"));
        assert!(!diagram.contains("click Phantom"));
    }
}
