use clap::Parser;
use secret_santa::core::MailTransport;
use secret_santa::utils::{logger, validation::Validate};
use secret_santa::{
    load_participants, CliConfig, Command, Dispatcher, LogFormat, LogOnlyTransport, MailConfig,
    RunArgs, RunSummary, SantaEngine, SantaError, SmtpMailTransport, TeraTemplate, ThreadRandom,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(),
    }
    tracing::debug!("CLI config: {:?}", config);

    let result = match &config.command {
        Command::Run(args) => run(args).await,
    };

    match result {
        Ok(summary) => {
            let report = &summary.report;
            println!(
                "🎅 {} participants matched, {} notified",
                summary.participants, report.succeeded
            );
            if report.is_clean() {
                return;
            }

            eprintln!("❌ {} notifications failed:", report.failed.len());
            for failure in &report.failed {
                eprintln!(
                    "   - {} <{}>: {}",
                    failure.assignment.giver.name, failure.assignment.giver.email, failure.reason
                );
            }
            std::process::exit(summary.exit_code());
        }
        Err(e) => {
            tracing::error!(
                "Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(args: &RunArgs) -> Result<RunSummary, SantaError> {
    args.validate()?;

    let input = args.input_path();
    let participants = load_participants(&input)?;
    tracing::info!("Loaded {} participants from {}", participants.len(), input.display());

    let template = TeraTemplate::load(&args.template)?;

    if args.dry_run {
        return execute(LogOnlyTransport, args, &participants, &template).await;
    }

    let mail_config = MailConfig::from_env()?;
    tracing::debug!("Mail config: {:?}", mail_config);
    execute(
        SmtpMailTransport::new(mail_config),
        args,
        &participants,
        &template,
    )
    .await
}

async fn execute<T: MailTransport>(
    transport: T,
    args: &RunArgs,
    participants: &[secret_santa::Participant],
    template: &TeraTemplate,
) -> Result<RunSummary, SantaError> {
    let dispatcher = Dispatcher::new(transport).with_subject(args.subject.clone());
    let mut engine = SantaEngine::new(dispatcher, ThreadRandom::new());
    engine.run(participants, template).await
}
