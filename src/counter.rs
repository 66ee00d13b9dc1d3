use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::database::SuffixDatabase;
use crate::domain;
use crate::input;
use crate::stats::SuffixTally;

/// Tallies the public suffix of every non-blank line in `path`.
pub fn count_suffixes(database: &SuffixDatabase, path: &Path) -> Result<SuffixTally> {
    let start_time = Instant::now();
    info!(action = "start", component = "suffix_count", file_path = ?path, "Starting suffix count");

    let tally = input::open_lines(path)?
        .map(|line| line.map(|line| domain::extract(database, &line).suffix))
        .collect::<Result<SuffixTally, _>>()?;

    if tally.is_empty() {
        info!(action = "skip", component = "suffix_count", file_path = ?path, "No non-blank lines in input");
    }
    info!(
        action = "complete",
        component = "suffix_count",
        lines = tally.total(),
        distinct_suffixes = tally.distinct(),
        duration_ms = start_time.elapsed().as_millis(),
        "Suffix count completed"
    );
    Ok(tally)
}

/// Prints `<count> <suffix>` lines, most frequent first, limited to `top`
/// entries when given.
pub fn print_ranking<W: Write>(tally: &SuffixTally, top: Option<usize>, out: &mut W) -> Result<()> {
    let limit = top.unwrap_or(usize::MAX);
    for (suffix, count) in tally.ranked().into_iter().take(limit) {
        writeln!(out, "{} {}", count, suffix).context("Failed to write output")?;
    }
    out.flush().context("Failed to flush output")?;
    Ok(())
}
