use clap::{Args as ClapArgs, Parser};
use std::path::PathBuf;

/// Options shared by both tools that shape the suffix database.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct SuffixOptions {
    /// Load the public suffix list from a PSL-format file instead of the built-in copy
    #[arg(long, value_name = "FILE")]
    pub psl: Option<PathBuf>,

    /// Honour rules from the private section of the suffix list
    #[arg(long)]
    pub private: bool,

    /// Comma-separated list of extra suffixes (no spaces needed)
    #[arg(long, value_name = "LIST")]
    pub custom: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "tldex-domains",
    about = "Print the registered domain of every URL or hostname in a file",
    version,
    long_about = None
)]
pub struct ExtractArgs {
    /// File with one URL or hostname per line ("-" for stdin)
    pub file: PathBuf,

    /// Print the registered domain
    #[arg(long)]
    pub rd: bool,

    /// Print the fully-qualified domain name
    #[arg(long)]
    pub fqdn: bool,

    /// Print the public suffix
    #[arg(long)]
    pub tld: bool,

    /// Print only lines that cannot be parsed, to stderr
    #[arg(long)]
    pub err: bool,

    #[command(flatten)]
    pub suffix: SuffixOptions,
}

/// A field the domain extractor can print for each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    RegisteredDomain,
    Fqdn,
    Suffix,
}

impl ExtractArgs {
    /// Selected output columns in print order. Defaults to the registered
    /// domain alone.
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = Vec::new();
        if self.rd || (!self.fqdn && !self.tld) {
            columns.push(Column::RegisteredDomain);
        }
        if self.fqdn {
            columns.push(Column::Fqdn);
        }
        if self.tld {
            columns.push(Column::Suffix);
        }
        columns
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "tldex-suffixes",
    about = "Count public suffixes in a file of URLs or hostnames, most frequent first",
    version,
    long_about = None
)]
pub struct CountArgs {
    /// File with one URL or hostname per line ("-" for stdin)
    pub file: PathBuf,

    /// Number of top suffixes to display
    #[arg(short, long)]
    pub top: Option<usize>,

    #[command(flatten)]
    pub suffix: SuffixOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_extract_requires_file() {
        let err = ExtractArgs::try_parse_from(["tldex-domains"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_count_rejects_zero_or_many_files() {
        assert!(CountArgs::try_parse_from(["tldex-suffixes"]).is_err());

        let err = CountArgs::try_parse_from(["tldex-suffixes", "a.txt", "b.txt"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_default_columns() {
        let args = ExtractArgs::try_parse_from(["tldex-domains", "hosts.txt"]).unwrap();
        assert_eq!(args.file, PathBuf::from("hosts.txt"));
        assert_eq!(args.columns(), vec![Column::RegisteredDomain]);
        assert!(!args.suffix.private);
        assert!(args.suffix.psl.is_none());
        assert!(!args.err);

        let args = ExtractArgs::try_parse_from(["tldex-domains", "--err", "hosts.txt"]).unwrap();
        assert!(args.err);
    }

    #[test]
    fn test_column_order_is_fixed() {
        let args =
            ExtractArgs::try_parse_from(["tldex-domains", "--tld", "--fqdn", "hosts.txt"]).unwrap();
        assert_eq!(args.columns(), vec![Column::Fqdn, Column::Suffix]);

        let args = ExtractArgs::try_parse_from([
            "tldex-domains",
            "--tld",
            "--rd",
            "--fqdn",
            "hosts.txt",
        ])
        .unwrap();
        assert_eq!(
            args.columns(),
            vec![Column::RegisteredDomain, Column::Fqdn, Column::Suffix]
        );
    }

    #[test]
    fn test_shared_suffix_options() {
        let args = CountArgs::try_parse_from([
            "tldex-suffixes",
            "--private",
            "--custom",
            "lan,internal",
            "--psl",
            "list.dat",
            "-t",
            "5",
            "-v",
            "hosts.txt",
        ])
        .unwrap();
        assert!(args.suffix.private);
        assert!(args.suffix.verbose);
        assert_eq!(args.suffix.custom.as_deref(), Some("lan,internal"));
        assert_eq!(args.suffix.psl, Some(PathBuf::from("list.dat")));
        assert_eq!(args.top, Some(5));
    }
}
