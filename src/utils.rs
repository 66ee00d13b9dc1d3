use clap::error::ErrorKind;
use clap::Parser;
use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Exit status for a malformed command line.
pub const USAGE_EXIT_CODE: i32 = 1;

/// Logs go to stderr so stdout carries only results. `RUST_LOG` overrides
/// the level picked by `verbose`.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let timer = LocalTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(timer)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parses the process arguments, exiting with [`USAGE_EXIT_CODE`] and a
/// usage message on stderr when they are malformed. `--help` and
/// `--version` print to stdout and exit 0.
pub fn parse_args<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                err.print().ok();
                std::process::exit(USAGE_EXIT_CODE);
            }
        },
    }
}
