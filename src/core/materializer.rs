use crate::domain::model::{PartitionPlan, PlanStep};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// Copy-to-destination primitive shared by both partitioners.
pub struct FileMaterializer<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> FileMaterializer<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// The destination's parent must already exist.
    pub async fn copy(&self, source: &Path, destination: &Path) -> Result<u64> {
        let bytes = self.storage.copy_file(source, destination).await?;
        tracing::debug!(
            "Copied {} -> {} ({} bytes)",
            source.display(),
            destination.display(),
            bytes
        );
        Ok(bytes)
    }

    /// Executes a plan in order, stopping at the first failure. Returns bytes copied.
    pub async fn apply(&self, plan: &PartitionPlan) -> Result<u64> {
        let mut total = 0;
        for step in &plan.steps {
            match step {
                PlanStep::CreateDir(dir) => self.storage.create_dir(dir).await?,
                PlanStep::Copy(placement) => {
                    total += self.copy(&placement.source, &placement.destination).await?;
                }
            }
        }
        Ok(total)
    }
}
