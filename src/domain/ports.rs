use crate::domain::model::{
    CollisionPolicy, CorpusIndex, LabelEncoding, PartitionPlan, SplitOrder, WorkspaceLayout,
};
use crate::utils::error::Result;
use std::future::Future;
use std::path::Path;

/// Filesystem operations the pipeline performs on the workspace and its inputs.
pub trait Storage: Send + Sync {
    fn exists(&self, path: &Path) -> impl Future<Output = bool> + Send;

    fn read_file(&self, path: &Path) -> impl Future<Output = Result<Vec<u8>>> + Send;

    /// Creates one directory; the parent must already exist.
    fn create_dir(&self, path: &Path) -> impl Future<Output = Result<()>> + Send;

    fn create_dir_all(&self, path: &Path) -> impl Future<Output = Result<()>> + Send;

    fn remove_dir_all(&self, path: &Path) -> impl Future<Output = Result<()>> + Send;

    /// Copies bytes and permissions. Returns the number of bytes copied.
    fn copy_file(
        &self,
        source: &Path,
        destination: &Path,
    ) -> impl Future<Output = Result<u64>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn corpus_root(&self) -> &Path;
    fn male_list(&self) -> &Path;
    fn female_list(&self) -> &Path;
    fn label_encoding(&self) -> LabelEncoding;
    fn workspace_root(&self) -> &Path;
    fn test_interval(&self) -> usize;
    fn split_order(&self) -> SplitOrder;
    fn collision_policy(&self) -> CollisionPolicy;
}

/// Decides where each scanned image goes inside one workspace zone.
pub trait Partitioner: Send + Sync {
    fn phase(&self) -> &'static str;

    fn plan(&self, corpus: &CorpusIndex, layout: &WorkspaceLayout) -> Result<PartitionPlan>;
}
