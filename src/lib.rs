pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command, LogFormat, RunArgs};

pub use adapters::{
    log_only::LogOnlyTransport, participants::load_participants, smtp::SmtpMailTransport,
    template::TeraTemplate,
};
pub use config::mail::MailConfig;
pub use core::{
    dispatch::Dispatcher,
    engine::{RunSummary, SantaEngine},
    matching::{generate_matches, ThreadRandom},
};
pub use domain::model::{Assignment, DispatchFailure, DispatchReport, FailureReason, Participant};
pub use utils::error::{Result, SantaError};
