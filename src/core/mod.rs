pub mod dispatch;
pub mod engine;
pub mod matching;

pub use crate::domain::model::{
    Assignment, DispatchFailure, DispatchReport, FailureReason, OutgoingMessage, Participant,
};
pub use crate::domain::ports::{MailSession, MailTransport, MessageTemplate, RandomSource};
pub use crate::utils::error::Result;
