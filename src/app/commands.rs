use crate::core::engine::StagingEngine;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::Subcommand))]
pub enum Command {
    /// Build the workspace if it does not exist yet
    Stage,
    /// Remove the workspace if present
    Teardown,
    /// Show what staging would produce without writing anything
    Plan,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub monitor: bool,
    pub report: bool,
}

/// Validates the configuration, then runs one command to completion.
pub async fn run_command<S, C>(
    command: Command,
    storage: S,
    config: C,
    options: RunOptions,
) -> Result<()>
where
    S: Storage,
    C: ConfigProvider + Validate,
{
    config.validate()?;
    tracing::debug!(
        "Corpus {}, workspace {}, interval {}, order {:?}, collision {:?}",
        config.corpus_root().display(),
        config.workspace_root().display(),
        config.test_interval(),
        config.split_order(),
        config.collision_policy()
    );

    let engine = StagingEngine::new_with_monitoring(storage, config, options.monitor);

    match command {
        Command::Stage => {
            let report = engine.stage().await?;
            if report.already_staged {
                tracing::info!("Nothing to do; run `teardown` first to rebuild");
            } else {
                tracing::info!("✅ Workspace staged at {}", report.workspace.display());
            }
            if options.report {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Command::Teardown => {
            if !engine.teardown().await? {
                tracing::debug!(
                    "Teardown left {} untouched",
                    engine.layout().root().display()
                );
            }
        }
        Command::Plan => {
            tracing::info!("🔍 DRY RUN MODE - No files will be written");
            let summaries = engine.plan().await?;
            if options.report {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            }
        }
    }

    Ok(())
}
