use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::args::Column;
use crate::database::SuffixDatabase;
use crate::domain::{self, Extraction};
use crate::input;

fn render(extraction: &Extraction, columns: &[Column]) -> String {
    columns
        .iter()
        .map(|column| match column {
            Column::RegisteredDomain => extraction.registered_domain(),
            Column::Fqdn => extraction.fqdn(),
            Column::Suffix => extraction.suffix.clone(),
        })
        .collect::<Vec<_>>()
        .join("\t")
}

/// Writes one line per non-blank input line, in input order.
///
/// Returns the number of lines written.
pub fn extract_domains<W: Write>(
    database: &SuffixDatabase,
    path: &Path,
    columns: &[Column],
    out: &mut W,
) -> Result<usize> {
    let start_time = Instant::now();
    info!(action = "start", component = "domain_extraction", file_path = ?path, "Starting domain extraction");

    let mut written = 0;
    for line in input::open_lines(path)? {
        let line = line?;
        let extraction = domain::extract(database, &line);
        writeln!(out, "{}", render(&extraction, columns)).context("Failed to write output")?;
        written += 1;
    }
    out.flush().context("Failed to flush output")?;

    info!(
        action = "complete",
        component = "domain_extraction",
        lines = written,
        duration_ms = start_time.elapsed().as_millis(),
        "Domain extraction completed"
    );
    Ok(written)
}

/// Reports every non-blank line that has no known public suffix as
/// `ERROR: Can not parse: <line>`. Nothing else is written.
///
/// Returns the number of lines reported.
pub fn report_unparsed<W: Write>(
    database: &SuffixDatabase,
    path: &Path,
    err: &mut W,
) -> Result<usize> {
    let start_time = Instant::now();
    info!(action = "start", component = "unparsed_report", file_path = ?path, "Checking lines for parse failures");

    let mut reported = 0;
    for line in input::open_lines(path)? {
        let line = line?;
        if domain::extract(database, &line).suffix.is_empty() {
            writeln!(err, "ERROR: Can not parse: {}", line).context("Failed to write report")?;
            reported += 1;
        }
    }
    err.flush().context("Failed to flush report")?;

    info!(
        action = "complete",
        component = "unparsed_report",
        unparsed = reported,
        duration_ms = start_time.elapsed().as_millis(),
        "Parse failure check completed"
    );
    Ok(reported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn run(content: &str, columns: &[Column]) -> (usize, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts.txt");
        fs::write(&path, content).unwrap();

        let mut out = Vec::new();
        let written =
            extract_domains(&SuffixDatabase::builtin(), &path, columns, &mut out).unwrap();
        (written, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_prints_registered_domain_per_line() {
        let (written, output) = run(
            "www.example.co.uk\n\nhttps://mail.google.com/inbox\n   \nwww.theregister.co.uk\n",
            &[Column::RegisteredDomain],
        );
        assert_eq!(written, 3);
        assert_eq!(output, "example.co.uk\ngoogle.com\ntheregister.co.uk\n");
    }

    #[test]
    fn test_unparseable_lines_print_empty() {
        let (written, output) = run("localhost\n10.0.0.1\nco.uk\n", &[Column::RegisteredDomain]);
        assert_eq!(written, 3);
        assert_eq!(output, "\n\n\n");
    }

    #[test]
    fn test_blank_only_input_prints_nothing() {
        let (written, output) = run("\n  \n\t\n", &[Column::RegisteredDomain]);
        assert_eq!(written, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_multiple_columns_tab_separated() {
        let (_, output) = run(
            "www.example.co.uk\n",
            &[Column::RegisteredDomain, Column::Fqdn, Column::Suffix],
        );
        assert_eq!(output, "example.co.uk\twww.example.co.uk\tco.uk\n");
    }

    #[test]
    fn test_report_lists_only_unparseable_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts.txt");
        fs::write(&path, "www.example.co.uk\nlocalhost\n\n10.0.0.1\nexample.com\n").unwrap();

        let mut err = Vec::new();
        let reported = report_unparsed(&SuffixDatabase::builtin(), &path, &mut err).unwrap();

        assert_eq!(reported, 2);
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "ERROR: Can not parse: localhost\nERROR: Can not parse: 10.0.0.1\n"
        );
    }

    #[test]
    fn test_missing_file_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let err = extract_domains(
            &SuffixDatabase::builtin(),
            &dir.path().join("missing.txt"),
            &[Column::RegisteredDomain],
            &mut out,
        )
        .unwrap_err();

        assert!(err.to_string().contains("missing.txt"));
        assert!(out.is_empty());
    }
}
