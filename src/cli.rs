//! CLI parsing.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;

/// Seccomp probe - check which I/O multiplexing syscalls the sandbox allows
#[derive(Parser, Debug, Default)]
#[command(name = "seccomp-probe")]
#[command(
    about = "Run epoll_create1, epoll_ctl, epoll_wait, poll and pselect and report which succeed"
)]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (written to stderr)
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Path to a JSON file overriding probe parameters
    #[arg(short = 's', long = "settings")]
    pub settings: Option<PathBuf>,

    /// Anything else on the command line; never affects the checks.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub ignored: Vec<String>,

    /// Parse error that made the command line fall back to defaults.
    #[arg(skip)]
    pub parse_error: Option<String>,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse_lenient(std::env::args_os())
    }

    /// Parse `args`, falling back to the defaults when they do not parse.
    ///
    /// `--help` and `--version` print and exit 0 as usual. Any other
    /// command line still runs the probe.
    pub fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Cli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(e) => match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
                _ => Cli {
                    parse_error: Some(e.kind().as_str().unwrap_or("invalid arguments").to_string()),
                    ..Cli::default()
                },
            },
        }
    }
}
