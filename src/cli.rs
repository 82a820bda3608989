use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Build row-store scan filters and render them into Filter Language expressions
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML config file with scanner defaults
    #[arg(long, global = true, env = "SCAN_FILTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'F', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a filter description file into a filter expression
    Render {
        /// Filter description (.toml, .json or .json5)
        file: PathBuf,
    },
    /// Print a scanner-creation request body with the filter attached
    Scanner {
        /// Filter description (.toml, .json or .json5)
        file: PathBuf,

        /// Rows per batch (overrides the config)
        #[arg(long)]
        batch: Option<u32>,

        /// First row key of the scan
        #[arg(long)]
        start_row: Option<String>,

        /// Row key the scan stops before
        #[arg(long)]
        end_row: Option<String>,

        /// Restrict to a `family:qualifier` column; repeatable
        #[arg(long = "column")]
        columns: Vec<String>,
    },
    /// List filter types, comparator types and compare operators
    List,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
