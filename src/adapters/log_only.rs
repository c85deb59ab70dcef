use crate::core::{MailSession, MailTransport, OutgoingMessage, Result};
use async_trait::async_trait;

/// Transport for `--dry-run`: logs what would be sent and never opens a
/// connection.
#[derive(Debug, Clone, Default)]
pub struct LogOnlyTransport;

#[async_trait]
impl MailTransport for LogOnlyTransport {
    type Session = LogOnlySession;

    async fn dial(&self) -> Result<LogOnlySession> {
        tracing::info!("Dry run: no email will be sent");
        Ok(LogOnlySession { count: 0 })
    }
}

#[derive(Debug)]
pub struct LogOnlySession {
    count: usize,
}

#[async_trait]
impl MailSession for LogOnlySession {
    async fn send(&mut self, message: &OutgoingMessage) -> Result<()> {
        self.count += 1;
        tracing::info!(
            to = %message.to_address,
            subject = %message.subject,
            "Dry run: skipping send"
        );
        tracing::trace!(body = %message.html_body, "Dry run: message body");
        Ok(())
    }

    async fn close(self) -> Result<()> {
        tracing::debug!("Dry run: {} messages rendered", self.count);
        Ok(())
    }
}
