//! Configuration for the documentation generator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (classdb.toml)
//! - Environment variables (CLASSDB_*)
//!
//! ## Example config file (classdb.toml):
//! ```toml
//! input = "db/database.py"
//! out_dir = "site/public/db"
//! docs_dir = "site/src/content/docs/classes"
//! pretty = false
//! ```

use std::path::PathBuf;

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    /// Path to the class database text file
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Directory receiving `classes/*.json`, `index.json`, `classIndex.json`
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Directory receiving one MDX page per class
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// Pretty-print JSON artifacts (default compact)
    #[serde(default)]
    pub pretty: bool,
}

// Default value functions
fn default_input() -> PathBuf {
    PathBuf::from("db/database.py")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("site/public/db")
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("site/src/content/docs/classes")
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            out_dir: default_out_dir(),
            docs_dir: default_docs_dir(),
            pretty: false,
        }
    }
}

impl GenConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, optionally from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["classdb.toml", ".classdb.toml"];
        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("CLASSDB")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
