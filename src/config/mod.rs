pub mod mail;

#[cfg(feature = "cli")]
use crate::adapters::participants::DEFAULT_INPUT_PATH;
#[cfg(feature = "cli")]
use crate::adapters::template::DEFAULT_TEMPLATE_PATH;
#[cfg(feature = "cli")]
use crate::core::dispatch::DEFAULT_SUBJECT;
#[cfg(feature = "cli")]
use crate::utils::error::{Result, SantaError};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "secret-santa")]
#[command(version)]
#[command(about = "Generates Secret Santa matches and notifies the participants by email")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Match everyone in the participant file and email each giver
    Run(RunArgs),
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Participant file (JSON)
    #[arg(value_name = "PATH", conflicts_with = "file")]
    pub path: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Participant file (JSON), same as the positional PATH")]
    pub file: Option<PathBuf>,

    #[arg(long, value_name = "PATH", default_value = DEFAULT_TEMPLATE_PATH)]
    pub template: PathBuf,

    #[arg(long, default_value = DEFAULT_SUBJECT)]
    pub subject: String,

    #[arg(long, help = "Render every message but send nothing")]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl RunArgs {
    pub fn input_path(&self) -> PathBuf {
        self.path
            .clone()
            .or_else(|| self.file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH))
    }
}

#[cfg(feature = "cli")]
impl Validate for RunArgs {
    fn validate(&self) -> Result<()> {
        validate_path("file", &self.input_path().to_string_lossy()).map_err(as_argument_error)?;
        validate_path("template", &self.template.to_string_lossy()).map_err(as_argument_error)?;
        validate_non_empty_string("subject", &self.subject).map_err(as_argument_error)?;
        Ok(())
    }
}

// The shared validators speak in config terms; command-line values are arguments.
#[cfg(feature = "cli")]
fn as_argument_error(error: SantaError) -> SantaError {
    match error {
        SantaError::InvalidConfigValueError { field, reason, .. } => SantaError::InvalidArgument {
            argument: format!("--{}", field),
            reason,
        },
        other => other,
    }
}
