use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use tracing_subscriber::filter::LevelFilter;

use mxsan::Options;

/// Escape stray `<`, `>`, `&` and quotes in near-valid draw.io XML.
#[derive(Parser, Debug)]
#[command(name = "mxsan", version, about)]
pub struct Cli {
    /// Input file, `-` or nothing for stdin
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep leading and trailing whitespace
    #[arg(long)]
    pub no_trim: bool,

    /// Verify that the result is well-formed XML (exit code 2 if not)
    #[arg(long)]
    pub check: bool,

    /// Fail if the input ends inside a tag, attribute value, comment or CDATA section (exit code 3)
    #[arg(long)]
    pub strict: bool,

    /// More log output, repeat for more
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }

    pub fn options(&self) -> Options {
        Options {
            trim: !self.no_trim,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}
