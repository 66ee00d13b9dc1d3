use anyhow::Result;
use std::io::{self, BufWriter};
use tldex::{extractor, utils, ExtractArgs, SuffixDatabase};

fn main() -> Result<()> {
    let args: ExtractArgs = utils::parse_args();
    utils::setup_logging(args.suffix.verbose);

    let database = SuffixDatabase::from_options(&args.suffix)?;

    if args.err {
        let stderr = io::stderr();
        let mut err = stderr.lock();
        extractor::report_unparsed(&database, &args.file, &mut err)?;
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    extractor::extract_domains(&database, &args.file, &args.columns(), &mut out)?;
    Ok(())
}
