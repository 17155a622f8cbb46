use crate::app::pipelines::{GenderPartitioner, IdentityPartitioner};
use crate::core::labels::load_reference_labels;
use crate::core::materializer::FileMaterializer;
use crate::core::scanner::CorpusScanner;
use crate::core::workspace::WorkspaceManager;
use crate::domain::model::{
    CorpusIndex, PartitionPlan, PhaseSummary, ReferenceLabels, StageReport, WorkspaceLayout,
};
use crate::domain::ports::{ConfigProvider, Partitioner, Storage};
use crate::utils::error::Result;
use crate::utils::monitor::PhaseMonitor;
use chrono::Utc;

/// Runs the staging pipeline against one workspace.
pub struct StagingEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    layout: WorkspaceLayout,
    monitor_enabled: bool,
}

impl<S: Storage, C: ConfigProvider> StagingEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::new_with_monitoring(storage, config, false)
    }

    pub fn new_with_monitoring(storage: S, config: C, monitor_enabled: bool) -> Self {
        let layout = WorkspaceLayout::new(config.workspace_root());
        Self {
            storage,
            config,
            layout,
            monitor_enabled,
        }
    }

    pub fn layout(&self) -> &WorkspaceLayout {
        &self.layout
    }

    /// Builds the workspace unless its root already exists.
    pub async fn stage(&self) -> Result<StageReport> {
        let started_at = Utc::now();
        let mut monitor = PhaseMonitor::new(self.monitor_enabled);
        let manager = WorkspaceManager::new(&self.storage, &self.layout);

        if manager.is_staged().await {
            tracing::info!(
                "Workspace '{}' seems to be in place, no need to format the data",
                manager.root().display()
            );
            return Ok(StageReport {
                workspace: manager.root().to_path_buf(),
                started_at,
                finished_at: Utc::now(),
                already_staged: true,
                phases: Vec::new(),
            });
        }

        let (labels, corpus) = self.prepare().await?;
        // Plans are complete before the skeleton exists, so a collision or bad interval
        // aborts without leaving a tree that looks staged.
        let plans = self.plan_phases(&labels, &corpus)?;
        monitor.log_phase("Inputs");

        manager.create_skeleton().await?;

        let materializer = FileMaterializer::new(&self.storage);
        let mut phases = Vec::with_capacity(plans.len());
        for (phase, plan) in &plans {
            tracing::info!("Starting preparation of {} data, please wait...", phase);

            let bytes = materializer.apply(plan).await?;
            let summary = PhaseSummary::from_plan(phase, plan);

            tracing::info!(
                "{} data is now ready: {} train, {} test, {} skipped ({} bytes)",
                phase,
                summary.train,
                summary.test,
                summary.skipped,
                bytes
            );
            monitor.log_phase(phase);
            phases.push(summary);
        }

        monitor.log_final();
        Ok(StageReport {
            workspace: manager.root().to_path_buf(),
            started_at,
            finished_at: Utc::now(),
            already_staged: false,
            phases,
        })
    }

    /// Computes both partitions without touching the workspace.
    pub async fn plan(&self) -> Result<Vec<PhaseSummary>> {
        let (labels, corpus) = self.prepare().await?;

        let mut summaries = Vec::new();
        for (phase, plan) in self.plan_phases(&labels, &corpus)? {
            let summary = PhaseSummary::from_plan(phase, &plan);
            tracing::info!(
                "🔍 {}: {} train, {} test, {} skipped, {} directories",
                summary.phase,
                summary.train,
                summary.test,
                summary.skipped,
                summary.directories
            );
            summaries.push(summary);
        }

        let singletons = corpus
            .identities
            .iter()
            .filter(|group| group.images.len() == 1)
            .count();
        tracing::info!(
            "🔍 {} identities, {} with a single image (empty test folder)",
            corpus.identities.len(),
            singletons
        );

        Ok(summaries)
    }

    pub async fn teardown(&self) -> Result<bool> {
        WorkspaceManager::new(&self.storage, &self.layout)
            .teardown()
            .await
    }

    /// Inputs are resolved before the workspace exists, so a missing list or corpus
    /// leaves nothing behind that looks staged.
    async fn prepare(&self) -> Result<(ReferenceLabels, CorpusIndex)> {
        let labels = load_reference_labels(
            &self.storage,
            self.config.male_list(),
            self.config.female_list(),
            self.config.label_encoding(),
        )
        .await?;

        let corpus =
            CorpusScanner::new(self.config.corpus_root(), self.config.split_order()).scan()?;
        if corpus.is_empty() {
            tracing::warn!("Corpus {} contains no images", self.config.corpus_root().display());
        }

        Ok((labels, corpus))
    }

    fn plan_phases(
        &self,
        labels: &ReferenceLabels,
        corpus: &CorpusIndex,
    ) -> Result<Vec<(&'static str, PartitionPlan)>> {
        let gender = GenderPartitioner::new(
            labels,
            self.config.test_interval(),
            self.config.collision_policy(),
        );
        let identity = IdentityPartitioner::new();
        let partitioners: [&dyn Partitioner; 2] = [&gender, &identity];

        partitioners
            .into_iter()
            .map(|partitioner| {
                let plan = partitioner.plan(corpus, &self.layout)?;
                Ok((partitioner.phase(), plan))
            })
            .collect()
    }
}
