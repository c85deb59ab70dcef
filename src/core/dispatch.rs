use crate::core::{
    Assignment, DispatchReport, FailureReason, MailSession, MailTransport, MessageTemplate,
    OutgoingMessage, Result,
};

pub const DEFAULT_SUBJECT: &str = "Your Secret Santa Match!";

/// Renders and sends one notification per assignment over a single
/// transport session.
pub struct Dispatcher<T: MailTransport> {
    transport: T,
    subject: String,
}

impl<T: MailTransport> Dispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            subject: DEFAULT_SUBJECT.to_string(),
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Runs one dispatch batch.
    ///
    /// A dial failure aborts before anything is sent and no report is
    /// produced. Render and send failures are recorded per assignment and the
    /// batch continues with the next one.
    pub async fn dispatch(
        &self,
        assignments: &[Assignment],
        template: &dyn MessageTemplate,
    ) -> Result<DispatchReport> {
        let mut session = self.transport.dial().await?;
        tracing::debug!("Mail session open, sending {} messages", assignments.len());

        let mut report = DispatchReport::default();
        for assignment in assignments {
            let html_body = match template.render(assignment) {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Could not render message for {}: {}", assignment.giver.email, e);
                    report.record_failure(assignment, FailureReason::Render(e.to_string()));
                    continue;
                }
            };

            let message = OutgoingMessage {
                to_name: assignment.giver.name.clone(),
                to_address: assignment.giver.email.clone(),
                subject: self.subject.clone(),
                html_body,
            };

            match session.send(&message).await {
                Ok(()) => {
                    tracing::info!("Notified {}", assignment.giver.email);
                    report.record_success();
                }
                Err(e) => {
                    tracing::warn!("Sending to {} failed: {}", assignment.giver.email, e);
                    report.record_failure(assignment, FailureReason::Send(e.to_string()));
                }
            }
        }

        if let Err(e) = session.close().await {
            tracing::warn!("Mail session did not close cleanly: {}", e);
        }

        Ok(report)
    }
}
