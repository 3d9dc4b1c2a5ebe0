pub mod commands;
pub mod error;
pub mod output;

pub use commands::{AnalyzeCommand, LexiconCommand, RunCommand};
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, format_percent, truncate_string};
