//! Companion MDX page generation
//!
//! One page per class: title, inheritance links, the Mermaid diagram,
//! and the artifact reference. The field table itself is rendered
//! client-side from the JSON artifact the page points at.

use crate::artifact::{slug, ArtifactRecord, NameIndex};
use crate::decl::ClassDecl;
use crate::diagram::inheritance_diagram;

/// Page filename for a class: lowercase slug for site URL compatibility
pub fn page_file_name(class_name: &str) -> String {
    format!("{}.mdx", slug(class_name))
}

/// Render the MDX page for one class. `artifact_file` is the
/// content-addressed JSON filename the page embeds for client-side
/// rendering.
pub fn render_page(
    class: &ClassDecl,
    record: &ArtifactRecord,
    artifact_file: &str,
    index: &NameIndex,
) -> String {
    let display_name = class.display_name();

    let bases_links: Vec<String> = class
        .bases
        .iter()
        .map(|base| format!("[{}](/classes/{})", base, slug(base)))
        .collect();
    let bases_text = if bases_links.is_empty() {
        String::new()
    } else {
        format!("**Inherits from:** {}", bases_links.join(", "))
    };

    let diagram = inheritance_diagram(
        &class.name,
        &class.bases,
        &record.direct_children,
        index,
    );
    let diagram_block = if diagram.is_empty() {
        String::new()
    } else {
        format!("```mermaid\n{}\n```\n", diagram)
    };

    format!(
        r#"---
title: {display_name}
description: Reference documentation for {display_name} meta class
---

import ClassDetails from '../../../components/ClassDetails.astro';

# {display_name}

{bases_text}

{diagram_block}
<ClassDetails file="/db/classes/{artifact_file}" />
"#
    )
}
