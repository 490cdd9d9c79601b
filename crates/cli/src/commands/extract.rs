use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Args;
use log::error;

use vgram_engine::{
    GramTable, IndexOptions, MatchStrategy, extract_query, extract_value, load_table,
};
use vgram_runtime::default_table_path;

use crate::{commands::escape_byte, printer};

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Load the frequent-gram table from this file
    #[arg(long, conflicts_with = "options")]
    pub table: Option<PathBuf>,

    /// Build the table from inline options JSON,
    /// e.g. '{"min_q":2,"max_q":3,"vgrams":["th","he"]}'
    #[arg(long)]
    pub options: Option<String>,

    /// Treat TEXT as a LIKE/ILIKE pattern instead of an indexed value
    #[arg(long, short = 'q')]
    pub query: bool,

    /// Match strategy for pattern extraction
    #[arg(long, default_value = "like")]
    pub strategy: String,

    /// Escape character for pattern extraction
    #[arg(long, default_value = "\\")]
    pub escape: char,

    /// Emit NDJSON instead of plain lines
    #[arg(long)]
    pub json: bool,

    /// The value or pattern to extract from
    pub text: String,
}

pub fn run(args: ExtractArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            eprintln!("[extract] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ExtractArgs) -> Result<ExitCode> {
    let table = open_table(&args)?;

    let grams = if args.query {
        // Validated up front so an unsupported strategy fails before any
        // extraction output.
        let _strategy: MatchStrategy = args.strategy.parse()?;
        let escape = escape_byte(args.escape)?;
        extract_query(&table, args.text.as_bytes(), escape)
    } else {
        extract_value(&table, &args.text)
    };

    if args.query && grams.is_empty() {
        eprintln!("[extract] no selective gram: full scan required");
        return Ok(ExitCode::from(1));
    }

    if args.json {
        printer::print_grams_json(&grams)?;
    } else {
        printer::print_grams(&grams)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn open_table(args: &ExtractArgs) -> Result<GramTable> {
    if let Some(path) = &args.table {
        return load_table(path).with_context(|| format!("loading {}", path.display()));
    }

    if let Some(json) = &args.options {
        return Ok(IndexOptions::from_json(json)?.build_table()?);
    }

    let default_path = default_table_path();
    if default_path.exists() {
        return load_table(&default_path)
            .with_context(|| format!("loading {}", default_path.display()));
    }

    // No table anywhere: an empty default-options table still extracts,
    // it just treats every gram as rare.
    Ok(IndexOptions::default().build_table()?)
}
