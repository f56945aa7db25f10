// CLI configuration
use clap::{Parser, Subcommand, ValueEnum};

/// flacinfo - print the metadata of FLAC files, in the spirit of mp3info
#[derive(Parser, Debug)]
#[command(name = "flacinfo")]
#[command(about = "A script analogous to `mp3info`, but for flac files", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (log errors only, suppress warnings)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug-level logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Pretty,
    /// Compact JSON, one document per line
    Json,
    /// Flattened `key: value` pairs
    KeyValue,
    /// Aligned table
    #[default]
    Table,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show stream properties and tags
    Info {
        /// FLAC file path(s), glob patterns allowed
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,
    },

    /// Show Vorbis comments
    Tags {
        /// FLAC file path(s), glob patterns allowed
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        /// Only show these fields (case-insensitive, repeatable)
        #[arg(short, long = "tag", value_name = "KEY")]
        tags: Vec<String>,
    },

    /// List every metadata block with its decoded contents
    Blocks {
        /// FLAC file path(s), glob patterns allowed
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        /// Include full block contents, binary data as base64
        #[arg(long)]
        with_data: bool,
    },

    /// Describe embedded pictures
    Pictures {
        /// FLAC file path(s), glob patterns allowed
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,
    },
}

impl Commands {
    pub fn files(&self) -> &[String] {
        match self {
            Commands::Info { files }
            | Commands::Tags { files, .. }
            | Commands::Blocks { files, .. }
            | Commands::Pictures { files } => files,
        }
    }
}

impl Config {
    /// Default `tracing` filter directive for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}
