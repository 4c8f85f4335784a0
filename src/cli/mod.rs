pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, ClassifyArgs, Commands, NormalsArgs, OutputFormatArg, SymptomArg};
pub use output::{OutputFormat, OutputFormatter};
