// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every flag can also be provided through an `MB_*` environment variable,
//! which is handy on CI where the commit range comes from the environment.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `mb`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mb",
    version,
    about = "Build only the targets of a monorepo affected by a change.",
    long_about = None
)]
pub struct CliArgs {
    /// Commit range handed to `git diff --name-only [RANGE]`.
    ///
    /// Empty (the default) diffs the working tree against the index.
    #[arg(long, value_name = "RANGE", env = "MB_COMMIT_RANGE", default_value = "")]
    pub commit_range: String,

    /// Path to the config file (TOML).
    #[arg(long, value_name = "PATH", env = "MB_CONFIG", default_value = "monobuild.toml")]
    pub config: String,

    /// Print the impact analysis without building anything.
    #[arg(long, env = "MB_DIFF_ONLY")]
    pub diff_only: bool,

    /// Print the impact report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MB_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_diff_working_tree_with_default_config() {
        let args = CliArgs::try_parse_from(["mb"]).unwrap();
        assert_eq!(args.commit_range, "");
        assert_eq!(args.config, "monobuild.toml");
        assert!(!args.diff_only);
    }

    #[test]
    fn parses_range_and_diff_only() {
        let args = CliArgs::try_parse_from([
            "mb",
            "--commit-range",
            "HEAD~1..HEAD",
            "--diff-only",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.commit_range, "HEAD~1..HEAD");
        assert!(args.diff_only);
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    }
}
