use std::io::{self, Write};

use vgram_engine::Gram;
use vgram_stats::Mcelem;

/// Print one gram per line, decoding lossily for display.
pub fn print_grams(grams: &[Gram]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for gram in grams {
        writeln!(out, "{}", String::from_utf8_lossy(gram))?;
    }
    Ok(())
}

/// Print grams as NDJSON for machine consumption.
pub fn print_grams_json(grams: &[Gram]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for gram in grams {
        let obj = serde_json::json!({
            "gram": String::from_utf8_lossy(gram),
        });
        writeln!(out, "{obj}")?;
    }
    Ok(())
}

/// Print the kept elements with their frequencies, one per line.
pub fn print_mcelem(mc: &Mcelem) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (gram, freq) in mc.iter() {
        writeln!(out, "{}\t{freq:.6}", String::from_utf8_lossy(gram))?;
    }
    Ok(())
}

/// Print one pattern's estimated selectivity.
pub fn print_selectivity(pattern: &str, selectivity: f64) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{pattern}\t{selectivity:.6}")
}
