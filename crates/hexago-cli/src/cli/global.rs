//! Options shared by every `hexago` subcommand.
//!
//! All of them are `global`, so `hexago -v templates list` and
//! `hexago templates list -v` parse the same way.

use std::ffi::OsStr;
use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};
use tracing::level_filters::LevelFilter;

#[derive(Debug, Default, Args)]
#[command(next_help_heading = "Global options")]
pub struct GlobalArgs {
    /// Go project to operate on [default: current directory]
    #[arg(long = "path", global = true, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Log more: -v info, -vv debug, -vvv trace (RUST_LOG wins)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never emit ANSI colour; a non-empty NO_COLOR does the same
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Read settings from FILE instead of the standard locations
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How results are printed
    #[arg(long, global = true, value_enum, default_value_t)]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// Fold the `NO_COLOR` convention (<https://no-color.org>) into
    /// `no_color`: any non-empty value disables colour, whatever it says.
    pub fn merge_no_color_env(&mut self, value: Option<&OsStr>) {
        if value.is_some_and(|v| !v.is_empty()) {
            self.no_color = true;
        }
    }

    /// Filter level for hexago's own crates.
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

    /// `--path`, else the working directory.
    pub fn project_root(&self) -> std::io::Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir(),
        }
    }
}

/// How the CLI renders results on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `output.format` from config, else human on a terminal and plain otherwise
    #[default]
    Auto,
    /// Coloured, with status symbols
    Human,
    /// No colour
    Plain,
    /// One JSON document
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_and_quiet_pick_level() {
        let level = |verbose, quiet| {
            GlobalArgs {
                verbose,
                quiet,
                ..Default::default()
            }
            .log_level()
        };
        assert_eq!(level(0, false), LevelFilter::WARN);
        assert_eq!(level(1, false), LevelFilter::INFO);
        assert_eq!(level(2, false), LevelFilter::DEBUG);
        assert_eq!(level(7, false), LevelFilter::TRACE);
        assert_eq!(level(0, true), LevelFilter::ERROR);
    }

    #[test]
    fn no_color_env_needs_a_non_empty_value() {
        let merged = |value: Option<&str>| {
            let mut args = GlobalArgs::default();
            args.merge_no_color_env(value.map(OsStr::new));
            args.no_color
        };
        assert!(!merged(None));
        assert!(!merged(Some("")));
        assert!(merged(Some("1")));
        assert!(merged(Some("0")));
        assert!(merged(Some("false")));
    }

    #[test]
    fn no_color_flag_survives_empty_env() {
        let mut args = GlobalArgs {
            no_color: true,
            ..Default::default()
        };
        args.merge_no_color_env(Some(OsStr::new("")));
        assert!(args.no_color);
    }

    #[test]
    fn explicit_path_is_project_root() {
        let args = GlobalArgs {
            path: Some(PathBuf::from("/srv/shop")),
            ..Default::default()
        };
        assert_eq!(args.project_root().unwrap(), PathBuf::from("/srv/shop"));
    }
}
