use crate::core::dispatch::Dispatcher;
use crate::core::matching::generate_matches;
use crate::core::{DispatchReport, MailTransport, MessageTemplate, Participant, RandomSource, Result};
use crate::utils::error::{EXIT_PARTIAL_DELIVERY, EXIT_SUCCESS};

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub participants: usize,
    pub report: DispatchReport,
}

impl RunSummary {
    /// A finished batch with any failed notification exits non-zero.
    pub fn exit_code(&self) -> i32 {
        if self.report.is_clean() {
            EXIT_SUCCESS
        } else {
            EXIT_PARTIAL_DELIVERY
        }
    }
}

/// Shuffle, pair, then notify every giver.
pub struct SantaEngine<T: MailTransport, R: RandomSource> {
    dispatcher: Dispatcher<T>,
    rng: R,
}

impl<T: MailTransport, R: RandomSource> SantaEngine<T, R> {
    pub fn new(dispatcher: Dispatcher<T>, rng: R) -> Self {
        Self { dispatcher, rng }
    }

    pub async fn run(
        &mut self,
        participants: &[Participant],
        template: &dyn MessageTemplate,
    ) -> Result<RunSummary> {
        tracing::info!("Generating matches for {} participants", participants.len());
        let assignments = generate_matches(participants, &mut self.rng)?;

        tracing::info!("Sending {} notifications", assignments.len());
        let report = self.dispatcher.dispatch(&assignments, template).await?;
        tracing::info!(
            "Delivered {} of {} notifications",
            report.succeeded,
            report.attempted()
        );

        Ok(RunSummary {
            participants: participants.len(),
            report,
        })
    }
}
