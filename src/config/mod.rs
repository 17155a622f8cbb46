#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_CORPUS_ROOT: &str = "./assets/persons/";
pub const DEFAULT_MALE_LIST: &str = "./assets/males.txt";
pub const DEFAULT_FEMALE_LIST: &str = "./assets/females.txt";
pub const DEFAULT_ENCODING: &str = "utf8";
pub const DEFAULT_WORKSPACE_ROOT: &str = "./tmp";
pub const DEFAULT_TEST_INTERVAL: usize = 10;
/// Smallest interval that still leaves images for training.
pub const MIN_TEST_INTERVAL: usize = 2;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_disjoint_roots, validate_encoding, validate_path, validate_positive_number,
};

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C, encoding_label: &str) -> Result<()> {
    validate_path("corpus.root", config.corpus_root())?;
    validate_path("labels.male", config.male_list())?;
    validate_path("labels.female", config.female_list())?;
    validate_path("workspace.root", config.workspace_root())?;
    validate_encoding("labels.encoding", encoding_label)?;
    validate_positive_number("split.test_interval", config.test_interval(), MIN_TEST_INTERVAL)?;
    validate_disjoint_roots(config.corpus_root(), config.workspace_root())?;
    Ok(())
}
