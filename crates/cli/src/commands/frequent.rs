use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Args;
use log::{debug, error};

use vgram_engine::{GramTable, VgramError, write_table_atomic};
use vgram_runtime::DEFAULT_THRESHOLD;
use vgram_stats::FrequentCollector;

use crate::{commands::for_each_line, printer};

#[derive(Debug, Args)]
pub struct FrequentArgs {
    /// Minimum gram length in characters
    #[arg(long, default_value_t = 2)]
    pub min_q: usize,

    /// Maximum gram length in characters
    #[arg(long, default_value_t = 2)]
    pub max_q: usize,

    /// Document-frequency threshold in [0, 1]
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Read documents from this file instead of stdin (one per line, \N is NULL)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Also write the packed frequent-gram table to this path
    #[arg(long)]
    pub save: Option<PathBuf>,
}

pub fn run(args: FrequentArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            eprintln!("[frequent] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: FrequentArgs) -> Result<ExitCode> {
    let mut collector = FrequentCollector::new(args.min_q, args.max_q, args.threshold)?;

    for_each_line(args.input.as_deref(), |doc| collector.add_document(doc))?;

    let docs = collector.documents_seen();
    debug!("scanned {docs} documents");

    let grams = collector.finish();

    if let Some(path) = &args.save {
        if docs == 0 {
            return Err(VgramError::InvalidUsage(
                "the aggregate saw no documents; refusing to save an empty table".into(),
            )
            .into());
        }
        let bytes: Vec<&[u8]> = grams.iter().map(|g| g.as_bytes()).collect();
        let table = GramTable::fill(&bytes, args.min_q, args.max_q)?;
        write_table_atomic(path, &table).with_context(|| format!("writing {}", path.display()))?;
        eprintln!(
            "[frequent] saved {} grams to {}",
            table.len(),
            path.display()
        );
    }

    printer::print_grams(&grams)?;
    Ok(ExitCode::SUCCESS)
}
