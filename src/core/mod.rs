pub mod engine;
pub mod labels;
pub mod materializer;
pub mod scanner;
pub mod workspace;

pub use crate::domain::model::{CorpusIndex, PartitionPlan, ReferenceLabels, WorkspaceLayout};
pub use crate::domain::ports::{ConfigProvider, Partitioner, Storage};
pub use crate::utils::error::Result;
