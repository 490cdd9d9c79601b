pub mod analyze;
pub mod extract;
pub mod frequent;

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};
use clap::Subcommand;

pub use analyze::AnalyzeArgs;
pub use extract::ExtractArgs;
pub use frequent::FrequentArgs;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Collect the frequent grams of a document stream.
    ///
    /// Example:
    ///   vgram frequent --min-q 2 --max-q 3 --threshold 0.05 < titles.txt
    ///   vgram frequent --input titles.txt --save table.bin
    Frequent(FrequentArgs),

    /// Extract the V-gram set of a value or a LIKE/ILIKE pattern.
    ///
    /// Example:
    ///   vgram extract --table table.bin 'some indexed value'
    ///   vgram extract --table table.bin --query '%needle%'
    Extract(ExtractArgs),

    /// Build most-common-element statistics and estimate selectivity.
    ///
    /// Example:
    ///   vgram analyze --input titles.txt --pattern '%the%' --pattern '%zz%'
    Analyze(AnalyzeArgs),
}

/// Literal marking a NULL document in the input stream.
const NULL_MARKER: &str = "\\N";

/// Feed every input line to `f`, from a file or from stdin.
pub(crate) fn for_each_line(path: Option<&Path>, mut f: impl FnMut(Option<&str>)) -> Result<()> {
    let feed = |line: &str, f: &mut dyn FnMut(Option<&str>)| {
        if line == NULL_MARKER {
            f(None);
        } else {
            f(Some(line));
        }
    };

    match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            for line in BufReader::new(file).lines() {
                feed(&line?, &mut f);
            }
        }
        None => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                feed(&line?, &mut f);
            }
        }
    }

    Ok(())
}

/// Parse a single-character escape flag into its byte.
pub(crate) fn escape_byte(escape: char) -> Result<u8> {
    if !escape.is_ascii() {
        anyhow::bail!("escape character {escape:?} is not a single byte");
    }
    Ok(escape as u8)
}
