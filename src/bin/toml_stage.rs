use anyhow::Context;
use clap::Parser;
use face_stage::config::toml_config::TomlConfig;
use face_stage::utils::logger;
use face_stage::{run_command, Command, LocalStorage, RunOptions};

#[derive(Parser)]
#[command(name = "toml-stage")]
#[command(about = "Face corpus staging driven by a TOML configuration file")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to TOML configuration file
    #[arg(short, long, default_value = "face-stage.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the monitoring setting from the config
    #[arg(long)]
    monitor: Option<bool>,

    /// Print a JSON run report to stdout
    #[arg(long)]
    report: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    logger::init_logger(args.verbose || config.logging.verbose, config.logging.json);
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    let options = RunOptions {
        monitor: args.monitor.unwrap_or(config.logging.monitor),
        report: args.report,
    };

    if let Err(e) = run_command(args.command, LocalStorage::new(), config, options).await {
        tracing::error!(
            "❌ {:?} failed: {} (Category: {:?}, Severity: {:?})",
            args.command,
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}
