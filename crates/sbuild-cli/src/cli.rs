//! CLI argument definitions for the soil profile workbench.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sbuild",
    version,
    about = "DSSAT soil profile workbench",
    long_about = "Inspect and edit DSSAT .SOL soil input files.\n\n\
                  Lists, reads, creates, updates, and deletes soil profile blocks,\n\
                  converts between runoff curve numbers and slope buckets, and\n\
                  locates experiment files that reference a profile."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the profiles in a .SOL file.
    Profiles {
        /// Path to the .SOL file.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print one profile as JSON.
    Show {
        /// Path to the .SOL file.
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// 10-character profile code.
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Create a new .SOL file holding one profile.
    Create(CreateArgs),

    /// Append a profile to an existing .SOL file.
    Append(AppendArgs),

    /// Update fields of one profile, leaving every other block untouched.
    Update {
        /// Path to the .SOL file.
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// 10-character profile code.
        #[arg(value_name = "CODE")]
        code: String,
        /// Field assignments, e.g. salb=0.15 slll=0.2
        #[arg(value_name = "KEY=VALUE", required = true)]
        fields: Vec<String>,
    },

    /// Delete one profile; the file itself is removed when no profile remains.
    Delete {
        /// Path to the .SOL file.
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// 10-character profile code.
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Show a profile's layers with missing hydraulic values estimated.
    Estimate {
        /// Path to the .SOL file.
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// 10-character profile code.
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Convert a runoff curve number to its % slope bucket.
    Slope {
        /// Hydrologic group (Lowest, Moderately Low, Moderately High, Highest).
        #[arg(value_name = "GROUP")]
        group: String,
        /// Curve number.
        #[arg(value_name = "CN")]
        cn: String,
    },

    /// Convert a % slope to the curve number stored for it.
    Cn {
        /// Hydrologic group (Lowest, Moderately Low, Moderately High, Highest).
        #[arg(value_name = "GROUP")]
        group: String,
        /// Slope percentage.
        #[arg(value_name = "SLOPE")]
        slope: String,
    },

    /// Find experiment files under a directory that reference a profile code.
    Locate {
        /// Directory to search recursively.
        #[arg(value_name = "ROOT")]
        root: PathBuf,
        /// Profile code to look for.
        #[arg(value_name = "CODE")]
        code: String,
    },
}

#[derive(Args)]
pub struct CreateArgs {
    /// Destination .SOL path.
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// JSON file describing the profile (id, site, coordinates, layers).
    #[arg(long = "profile", value_name = "JSON")]
    pub profile: PathBuf,

    /// Soil data source written on the profile line.
    #[arg(long = "source", value_name = "TEXT")]
    pub source: Option<String>,

    /// Soil series name written on the profile line.
    #[arg(long = "series", value_name = "TEXT")]
    pub series: Option<String>,
}

#[derive(Args)]
pub struct AppendArgs {
    /// Path to the existing .SOL file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// JSON file describing the profile (id, site, coordinates, layers).
    #[arg(long = "profile", value_name = "JSON")]
    pub profile: PathBuf,

    /// Soil data source written on the profile line.
    #[arg(long = "source", value_name = "TEXT")]
    pub source: Option<String>,

    /// Soil series name written on the profile line.
    #[arg(long = "series", value_name = "TEXT")]
    pub series: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
