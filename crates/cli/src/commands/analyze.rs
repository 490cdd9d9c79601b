use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Args;
use log::{debug, error};

use vgram_engine::VgramError;
use vgram_runtime::DEFAULT_TARGET_K;
use vgram_stats::{TopKCollector, pattern_selectivity};

use crate::{
    commands::{escape_byte, for_each_line},
    printer,
};

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Read sample rows from this file instead of stdin (one per line, \N is NULL)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Number of most-common elements to keep
    #[arg(long, default_value_t = DEFAULT_TARGET_K)]
    pub target_k: usize,

    /// Estimate the selectivity of this pattern (repeatable)
    #[arg(long = "pattern")]
    pub patterns: Vec<String>,

    /// Escape character for the patterns
    #[arg(long, default_value = "\\")]
    pub escape: char,
}

pub fn run(args: AnalyzeArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            eprintln!("[analyze] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: AnalyzeArgs) -> Result<ExitCode> {
    let escape = escape_byte(args.escape)?;

    let mut collector = TopKCollector::new(args.target_k);
    let mut rows = 0i64;
    for_each_line(args.input.as_deref(), |row| {
        collector.add_row(row);
        rows += 1;
    })?;

    if rows == 0 {
        return Err(VgramError::InvalidUsage(
            "analyze needs at least one sample row".into(),
        )
        .into());
    }
    debug!("analyzed {rows} rows, {} gram tokens", collector.tokens_seen());

    let stats = collector.finish();

    eprintln!(
        "[analyze] {} rows, {} elements kept, null fraction {:.4}",
        rows,
        stats.mcelem.len(),
        stats.null_frac
    );
    printer::print_mcelem(&stats.mcelem)?;

    for pattern in &args.patterns {
        let sel = pattern_selectivity(&stats, pattern.as_bytes(), escape);
        printer::print_selectivity(pattern, sel)?;
    }

    Ok(ExitCode::SUCCESS)
}
