use crate::domain::model::{Assignment, OutgoingMessage};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Uniform random index provider driving the shuffle.
pub trait RandomSource {
    /// Returns an index uniformly distributed in `0..bound`. `bound` is never zero.
    fn pick(&mut self, bound: usize) -> usize;
}

pub trait MessageTemplate: Send + Sync {
    /// Renders the message body for one assignment. Fails with
    /// `SantaError::TemplateRender` without producing partial output.
    fn render(&self, assignment: &Assignment) -> Result<String>;
}

/// A mail transport that can open one session per dispatch batch.
#[async_trait]
pub trait MailTransport: Send + Sync {
    type Session: MailSession;

    /// Connects and authenticates. Any failure here is `SantaError::TransportUnavailable`.
    async fn dial(&self) -> Result<Self::Session>;
}

#[async_trait]
pub trait MailSession: Send {
    async fn send(&mut self, message: &OutgoingMessage) -> Result<()>;

    async fn close(self) -> Result<()>;
}
