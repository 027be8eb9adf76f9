use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

use crate::ops::Options;
use crate::patch::WriteMode;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "deliframes", version, about)]
/// Removes AVI key frames from a file, keeping only the first one
pub struct Args {
    /// AVI file to patch in place, or the source when TARGET is given
    pub file: PathBuf,

    /// Copy FILE here and patch the copy instead, leaving FILE untouched
    pub target: Option<PathBuf>,

    /// Resolve every key frame and report it without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Write over the size field when the index uses absolute offsets, like older releases
    #[arg(long)]
    pub legacy_write: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Args {
    pub fn options(&self) -> Options {
        Options {
            mode: if self.legacy_write {
                WriteMode::Legacy
            } else {
                WriteMode::Fourcc
            },
            dry_run: self.dry_run,
        }
    }
}

/// Parses the command line. Usage errors exit with status 1.
pub fn parse() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                process::exit(1);
            }
        },
    }
}
