//! Class database documentation generator CLI
//!
//! Reads the class schema text file and regenerates the per-class JSON
//! artifacts, the navigation indexes, and the MDX documentation pages.

use std::path::PathBuf;

use clap::Parser;
use classdb::{generate, GenConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "classdb-gen")]
#[command(about = "Generate per-class JSON artifacts and MDX docs from the class database")]
struct Cli {
    /// Path to the class database text file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory for JSON artifacts and indexes
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Output directory for MDX pages
    #[arg(short, long)]
    docs: Option<PathBuf>,

    /// Pretty-print JSON artifacts
    #[arg(long)]
    pretty: bool,

    /// Report every input line the parser skipped
    #[arg(long)]
    strict: bool,

    /// Path to a config file (default: classdb.toml)
    #[arg(short, long)]
    config: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = GenConfig::load_from(cli.config.as_deref())?;

    // CLI flags override config-file/env values
    if let Some(input) = cli.input {
        config.input = input;
    }
    if let Some(out) = cli.out {
        config.out_dir = out;
    }
    if let Some(docs) = cli.docs {
        config.docs_dir = docs;
    }
    if cli.pretty {
        config.pretty = true;
    }

    let summary = generate(&config)?;

    println!("✅ Parsed {} classes from {:?}", summary.classes_parsed, config.input);
    println!(
        "   JSON:  {} changed, wrote to {:?}",
        summary.json_changed, config.out_dir
    );
    println!(
        "   Pages: {} changed, {} deleted, wrote to {:?}",
        summary.pages_changed, summary.pages_deleted, config.docs_dir
    );

    if summary.report.missing_marker {
        println!("⚠️  Input is missing the #!python marker line");
    }
    if cli.strict && !summary.report.skipped.is_empty() {
        println!();
        println!("⚠️  Skipped {} unrecognized lines:", summary.report.skipped.len());
        for skipped in &summary.report.skipped {
            println!("   {:>5}: {}", skipped.line, skipped.text);
        }
    }

    Ok(())
}
