// CLI module for flacinfo
//
// Presentation layer over the library: argument parsing, file expansion and
// report rendering. Only compiled into the binary.

pub mod commands;
pub mod config;
pub mod output;

pub use commands::run;
pub use config::Config;

// Error type for CLI operations
pub type CliResult<T> = anyhow::Result<T>;
