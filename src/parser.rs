//! Line-oriented parser for the class database text format
//!
//! The input looks like Python but is not executable:
//!
//! ```text
//! #!python
//! class TypeName(Base1, Base2):
//!     FieldName: (ft, kt, vt, kh)
//!     pass
//! ```
//!
//! The parser is permissive: structurally unrecognized lines are skipped,
//! never fatal. The reversing pipeline emits junk lines between classes
//! and consumers rely on them vanishing silently, so this policy is part
//! of the output contract. Skipped lines are still recorded in the
//! [`ParseReport`] so a strict caller can surface them.

use regex::Regex;
use tracing::{debug, warn};

use crate::decl::{ClassDecl, FieldDecl};

/// Marker expected on the first line of the input
pub const MARKER: &str = "#!python";

/// What a single input line was recognized as
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind {
    /// `class Name(Base1, Base2):` at column zero
    Header { name: String, bases: Vec<String> },
    /// Four-space-indented `Name: (ft, kt, vt, kh)`
    Field(FieldDecl),
    /// `pass`, possibly indented
    Terminator,
    /// Blank or whitespace-only
    Blank,
    /// Anything else
    Other,
}

/// A line the parser skipped, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the input
    pub line: usize,
    pub text: String,
}

/// Non-fatal findings from one parse pass
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    /// Input did not start with `#!python`
    pub missing_marker: bool,
    /// Non-blank lines that matched no recognized shape
    pub skipped: Vec<SkippedLine>,
}

/// Result of parsing one input file
#[derive(Debug, Clone)]
pub struct ParsedSchema {
    /// Classes in source order; duplicates are not merged
    pub classes: Vec<ClassDecl>,
    pub report: ParseReport,
}

/// The schema parser. Regexes are compiled once per instance.
pub struct Parser {
    header_re: Regex,
    field_re: Regex,
    terminator_re: Regex,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            header_re: Regex::new(r"^class\s+([^\s(]+)\s*\(([^)]*)\)\s*:\s*$")
                .expect("header regex"),
            field_re: Regex::new(
                r"^\s{4}([A-Za-z0-9_]+|0x[0-9a-fA-F]+):\s*\(\s*([^,\s]+)\s*,\s*([^,\s]+)\s*,\s*([^,\s]+)\s*,\s*([^)\s]+)\s*\)\s*$",
            )
            .expect("field regex"),
            terminator_re: Regex::new(r"^\s*pass\s*$").expect("terminator regex"),
        }
    }

    /// Parse the full input text into an ordered class list.
    ///
    /// Never fails: malformed lines are skipped and recorded in the
    /// report. A class left open at end of input is closed defensively.
    pub fn parse(&self, text: &str) -> ParsedSchema {
        let text = text.replace("\r\n", "\n");

        let mut report = ParseReport::default();
        if !text.starts_with(MARKER) {
            warn!("input doesn't start with '{}', continuing anyway", MARKER);
            report.missing_marker = true;
        }

        let mut classes: Vec<ClassDecl> = Vec::new();
        // Two states: no current class ("outside"), or one open class
        // accepting fields until its terminator.
        let mut current: Option<ClassDecl> = None;

        for (idx, raw) in text.split('\n').enumerate() {
            let line = raw.trim_end();
            match self.classify(line) {
                LineKind::Header { name, bases } => {
                    // A new header closes any class missing its terminator
                    if let Some(open) = current.take() {
                        classes.push(open);
                    }
                    current = Some(ClassDecl::new(name, bases));
                }
                LineKind::Field(field) => match current.as_mut() {
                    Some(open) => open.fields.push(field),
                    // Field outside any class: skip like any stray line
                    None => self.skip(&mut report, idx, line),
                },
                LineKind::Terminator => {
                    match current.take() {
                        Some(open) => classes.push(open),
                        None => self.skip(&mut report, idx, line),
                    }
                }
                LineKind::Blank => {}
                LineKind::Other => {
                    // The marker line is expected junk, not worth reporting
                    if idx == 0 && line.starts_with("#!") {
                        continue;
                    }
                    self.skip(&mut report, idx, line);
                }
            }
        }

        // Input ended while a class was open
        if let Some(open) = current.take() {
            classes.push(open);
        }

        ParsedSchema { classes, report }
    }

    /// Classify one (right-trimmed) line. All skip-vs-consume decisions
    /// funnel through here.
    fn classify(&self, line: &str) -> LineKind {
        if line.trim().is_empty() {
            return LineKind::Blank;
        }
        if let Some(caps) = self.header_re.captures(line) {
            let name = caps[1].trim().to_string();
            let bases = caps[2]
                .split(',')
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(String::from)
                .collect();
            return LineKind::Header { name, bases };
        }
        if let Some(caps) = self.field_re.captures(line) {
            return LineKind::Field(FieldDecl {
                name: caps[1].to_string(),
                field_type: caps[2].to_string(),
                aux_key_type: caps[3].to_string(),
                aux_value_type: caps[4].to_string(),
                referenced_type: caps[5].to_string(),
            });
        }
        if self.terminator_re.is_match(line) {
            return LineKind::Terminator;
        }
        LineKind::Other
    }

    fn skip(&self, report: &mut ParseReport, idx: usize, line: &str) {
        debug!(line = idx + 1, text = line, "skipping unrecognized line");
        report.skipped.push(SkippedLine {
            line: idx + 1,
            text: line.to_string(),
        });
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
