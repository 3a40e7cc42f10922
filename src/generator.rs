//! End-to-end generation pipeline
//!
//! One run is a single pass: read the input fully, parse, build the
//! inheritance graph for the whole class set, then write artifacts.
//! Graph computation finishes before the first write because every
//! artifact embeds transitive ancestor/descendant data. Re-running on
//! unchanged input writes nothing, so the tool is always safe to re-run.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::artifact::{write_if_changed, ArtifactRecord, IndexEntry, NameIndex, NavIndex};
use crate::config::GenConfig;
use crate::error::{DbError, Result};
use crate::graph::InheritanceGraph;
use crate::page::{page_file_name, render_page};
use crate::parser::{ParseReport, Parser};

/// What one run did, for the CLI summary
#[derive(Debug, Clone)]
pub struct GenSummary {
    pub classes_parsed: usize,
    pub json_changed: usize,
    pub pages_changed: usize,
    pub pages_deleted: usize,
    pub report: ParseReport,
}

/// One class's fully computed outputs, staged before any write
struct Rendered {
    json: String,
    file_name: String,
    page: String,
    page_name: String,
    entry: IndexEntry,
}

/// Run the full pipeline: parse → graph → artifacts → pages → cleanup →
/// indexes.
///
/// The only fatal failure before writing begins is an unreadable input
/// file; everything the parser cannot make sense of degrades to skipped
/// lines or plain-text references.
pub fn generate(config: &GenConfig) -> Result<GenSummary> {
    let text = fs::read_to_string(&config.input).map_err(|source| DbError::InputUnreadable {
        path: config.input.clone(),
        source,
    })?;

    let parsed = Parser::new().parse(&text);
    info!(classes = parsed.classes.len(), "parsed class database");

    let graph = InheritanceGraph::build(&parsed.classes);
    let index = NameIndex::from_classes(&parsed.classes);

    // Stage everything in memory first; writes start only once the full
    // set is computed.
    let mut rendered: Vec<Rendered> = Vec::with_capacity(parsed.classes.len());
    for class in &parsed.classes {
        let record = ArtifactRecord::new(class, graph.view(&class.name));
        let json = record.to_json(config.pretty)?;
        let file_name = record.file_name(&json);
        let page = render_page(class, &record, &file_name, &index);
        let entry = IndexEntry {
            name: class.name.clone(),
            file: format!("/db/classes/{}", file_name),
            bases: class.bases.clone(),
            prop_count: class.fields.len(),
        };
        rendered.push(Rendered {
            json,
            file_name,
            page,
            page_name: page_file_name(&class.name),
            entry,
        });
    }

    let classes_dir = config.out_dir.join("classes");
    let mut json_changed = 0;
    let mut pages_changed = 0;
    let mut generated_pages: HashSet<String> = HashSet::with_capacity(rendered.len());

    for item in &rendered {
        if write_if_changed(&classes_dir.join(&item.file_name), &item.json)? {
            json_changed += 1;
        }
        if write_if_changed(&config.docs_dir.join(&item.page_name), &item.page)? {
            pages_changed += 1;
        }
        generated_pages.insert(item.page_name.clone());
    }

    let pages_deleted = clean_stale_pages(&config.docs_dir, &generated_pages);

    let entries: Vec<IndexEntry> = rendered.into_iter().map(|r| r.entry).collect();
    write_nav_index(&config.out_dir.join("index.json"), entries, config.pretty)?;

    let index_json = if config.pretty {
        serde_json::to_string_pretty(&index)?
    } else {
        serde_json::to_string(&index)?
    };
    write_if_changed(&config.out_dir.join("classIndex.json"), &index_json)?;

    Ok(GenSummary {
        classes_parsed: parsed.classes.len(),
        json_changed,
        pages_changed,
        pages_deleted,
        report: parsed.report,
    })
}

/// Delete previously generated pages whose class no longer exists.
/// Best-effort: a missing directory means nothing to clean, and a page
/// that cannot be removed is logged and left behind.
fn clean_stale_pages(docs_dir: &Path, generated: &HashSet<String>) -> usize {
    if !docs_dir.is_dir() {
        return 0;
    }

    let mut deleted = 0;
    for entry in WalkDir::new(docs_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.ends_with(".mdx") && !generated.contains(name) {
            match fs::remove_file(path) {
                Ok(()) => deleted += 1,
                Err(e) => warn!(page = name, error = %e, "could not delete stale page"),
            }
        }
    }
    deleted
}

/// Write the navigation index, skipping the write when only the
/// generation timestamp would change.
fn write_nav_index(path: &Path, entries: Vec<IndexEntry>, pretty: bool) -> Result<bool> {
    let nav = NavIndex::new(entries);

    if let Ok(previous) = fs::read_to_string(path) {
        if let Ok(existing) = serde_json::from_str::<NavIndex>(&previous) {
            if existing.same_entries(&nav) {
                return Ok(false);
            }
        }
    }

    let json = if pretty {
        serde_json::to_string_pretty(&nav)?
    } else {
        serde_json::to_string(&nav)?
    };
    write_if_changed(path, &json)
}
