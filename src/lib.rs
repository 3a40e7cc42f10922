//! Class Database Documentation Generator
//!
//! Parses the reverse-engineered class schema of the game's binary
//! object model (a Python-looking, line-oriented text file) and produces
//! the artifacts the documentation site consumes.
//!
//! ## Features
//!
//! - **Permissive Parsing**: unrecognized input lines are skipped, never fatal
//! - **Inheritance Graph**: transitive ancestors/descendants with cycle protection
//! - **Content-Addressed Output**: filenames embed a SHA256 content hash
//! - **Idempotent Writes**: unchanged artifacts are never rewritten
//! - **Cross-Linking**: field types and diagrams link between class pages
//!
//! ## Output layout
//!
//! ```text
//! site/public/db/
//! ├── classes/
//! │   ├── Champion.5f3a9c01d2e4.json
//! │   └── 0x1A2B3C4D.77ab01c9e3f2.json
//! ├── index.json
//! └── classIndex.json
//! site/src/content/docs/classes/
//! ├── champion.mdx
//! └── 0x1a2b3c4d.mdx
//! ```

pub mod artifact;
pub mod checksum;
pub mod config;
pub mod decl;
pub mod diagram;
pub mod error;
pub mod generator;
pub mod graph;
pub mod linker;
pub mod page;
pub mod parser;

pub use artifact::{ArtifactRecord, IndexEntry, NameIndex, NavIndex};
pub use checksum::Checksum;
pub use config::GenConfig;
pub use decl::{ClassDecl, FieldDecl};
pub use error::{DbError, Result};
pub use generator::{generate, GenSummary};
pub use graph::{ClassGraphView, InheritanceGraph};
pub use parser::{ParsedSchema, Parser};
