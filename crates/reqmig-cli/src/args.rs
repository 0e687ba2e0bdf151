//! Command-line argument definitions for the reqmig CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input documents, the output
//! directory, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the module migration tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Legacy module document, or a directory of `*.json` documents
    #[arg(help = "Path to an input document or directory")]
    pub input: String,

    /// Directory that receives the migrated documents
    #[arg(short, long, default_value = "out")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["reqmig", "modules/"]);
        assert_eq!(args.input, "modules/");
        assert_eq!(args.output, "out");
        assert_eq!(args.config, None);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_all_options() {
        let args = Args::parse_from([
            "reqmig",
            "a.json",
            "-o",
            "migrated",
            "-c",
            "reqmig.toml",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.output, "migrated");
        assert_eq!(args.config.as_deref(), Some("reqmig.toml"));
        assert_eq!(args.log_level, "debug");
    }
}
