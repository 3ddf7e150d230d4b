use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "cumretdev CLI: cumulative returns from delimited files", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: SettingsOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that win over the settings file.
#[derive(Args, Clone, Debug, Default)]
pub struct SettingsOverrides {
    /// Single-character column delimiter
    #[arg(long, global = true)]
    pub delimiter: Option<String>,

    /// Date pattern of the first column (e.g. dd.MM.yyyy)
    #[arg(long = "date-format", global = true)]
    pub date_format: Option<String>,

    /// Expected text of the first header
    #[arg(long, global = true)]
    pub header0: Option<String>,

    /// Expected text of the second header
    #[arg(long, global = true)]
    pub header1: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate and process a file, then print the chart sequences
    Chart {
        file: PathBuf,

        /// JSON settings file (AllowedFileExtensions, Delimiter, DateFormat, ...)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the chart as a JSON object
        #[arg(long)]
        json: bool,

        /// Keep a copy of every accepted upload in this folder
        #[arg(long = "uploads-dir")]
        uploads_dir: Option<PathBuf>,
    },

    /// List every validation message for a file, one per line
    Check {
        file: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the sorted series with cumulative percentages
    Series {
        file: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}
