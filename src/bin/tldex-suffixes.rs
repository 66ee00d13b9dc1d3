use anyhow::Result;
use std::io::{self, BufWriter};
use tldex::{counter, utils, CountArgs, SuffixDatabase};

fn main() -> Result<()> {
    let args: CountArgs = utils::parse_args();
    utils::setup_logging(args.suffix.verbose);

    if args.top == Some(0) {
        anyhow::bail!("--top must be greater than 0");
    }

    let database = SuffixDatabase::from_options(&args.suffix)?;
    let tally = counter::count_suffixes(&database, &args.file)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    counter::print_ranking(&tally, args.top, &mut out)?;
    Ok(())
}
