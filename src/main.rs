use clap::Parser;
use face_stage::utils::logger;
use face_stage::{run_command, CliConfig, LocalStorage, RunOptions};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.json_logs);

    tracing::info!("Starting face-stage {:?}", config.command);
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let options = RunOptions {
        monitor: config.monitor,
        report: config.report,
    };
    let command = config.command;

    if let Err(e) = run_command(command, LocalStorage::new(), config, options).await {
        tracing::error!(
            "❌ {:?} failed: {} (Category: {:?}, Severity: {:?})",
            command,
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}
