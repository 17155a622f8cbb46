use crate::config::{
    validate_provider, DEFAULT_CORPUS_ROOT, DEFAULT_ENCODING, DEFAULT_FEMALE_LIST,
    DEFAULT_MALE_LIST, DEFAULT_WORKSPACE_ROOT,
};
use crate::domain::model::{CollisionPolicy, LabelEncoding, SplitOrder};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use crate::Command;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "face-stage")]
#[command(about = "Stages a face corpus into gender and identity train/test layouts")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Raw corpus root, one subdirectory per identity
    #[arg(long, default_value = DEFAULT_CORPUS_ROOT)]
    pub corpus: PathBuf,

    #[arg(long, default_value = DEFAULT_MALE_LIST)]
    pub male_list: PathBuf,

    #[arg(long, default_value = DEFAULT_FEMALE_LIST)]
    pub female_list: PathBuf,

    /// Encoding shared by both reference lists
    #[arg(long, default_value = DEFAULT_ENCODING)]
    pub encoding: String,

    #[arg(long, default_value = DEFAULT_WORKSPACE_ROOT)]
    pub workspace: PathBuf,

    /// Every n-th image in scan order goes to the gender test set
    #[arg(long, default_value_t = crate::config::DEFAULT_TEST_INTERVAL)]
    pub test_interval: usize,

    #[arg(long, value_enum, default_value_t = SplitOrder::Filesystem)]
    pub order: SplitOrder,

    #[arg(long, value_enum, default_value_t = CollisionPolicy::Fail)]
    pub collision: CollisionPolicy,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Log memory and timing per phase")]
    pub monitor: bool,

    #[arg(long, help = "Print a JSON run report to stdout")]
    pub report: bool,
}

impl ConfigProvider for CliConfig {
    fn corpus_root(&self) -> &Path {
        &self.corpus
    }

    fn male_list(&self) -> &Path {
        &self.male_list
    }

    fn female_list(&self) -> &Path {
        &self.female_list
    }

    // Validated before use; see `Validate`.
    fn label_encoding(&self) -> LabelEncoding {
        self.encoding.parse().unwrap_or_default()
    }

    fn workspace_root(&self) -> &Path {
        &self.workspace
    }

    fn test_interval(&self) -> usize {
        self.test_interval
    }

    fn split_order(&self) -> SplitOrder {
        self.order
    }

    fn collision_policy(&self) -> CollisionPolicy {
        self.collision
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self, &self.encoding)
    }
}
