use crate::domain::model::WorkspaceLayout;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// Owns the lifecycle of the staging workspace.
///
/// Staging is guarded only by the existence of the root directory. A run that aborted
/// partway leaves a tree that looks staged; run [`WorkspaceManager::teardown`] before
/// retrying.
pub struct WorkspaceManager<'a, S: Storage> {
    storage: &'a S,
    layout: &'a WorkspaceLayout,
}

impl<'a, S: Storage> WorkspaceManager<'a, S> {
    pub fn new(storage: &'a S, layout: &'a WorkspaceLayout) -> Self {
        Self { storage, layout }
    }

    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    pub async fn is_staged(&self) -> bool {
        self.storage.exists(self.root()).await
    }

    /// Recreates the root and the empty skeleton of both zones.
    pub async fn create_skeleton(&self) -> Result<()> {
        let root = self.root();

        if self.storage.exists(root).await {
            tracing::warn!("Directory '{}' already exists, deleting it", root.display());
            self.storage.remove_dir_all(root).await?;
        }

        self.storage.create_dir_all(root).await?;
        for dir in self.layout.skeleton() {
            self.storage.create_dir(&dir).await?;
        }

        tracing::debug!("Created workspace skeleton under {}", root.display());
        Ok(())
    }

    /// Returns whether anything was removed.
    pub async fn teardown(&self) -> Result<bool> {
        let root = self.root();
        if !self.storage.exists(root).await {
            tracing::info!("Workspace '{}' not present, nothing to remove", root.display());
            return Ok(false);
        }

        self.storage.remove_dir_all(root).await?;
        tracing::info!("Directory '{}' has been removed", root.display());
        Ok(true)
    }
}
