use crate::config::{
    validate_provider, DEFAULT_CORPUS_ROOT, DEFAULT_ENCODING, DEFAULT_FEMALE_LIST,
    DEFAULT_MALE_LIST, DEFAULT_TEST_INTERVAL, DEFAULT_WORKSPACE_ROOT,
};
use crate::domain::model::{CollisionPolicy, LabelEncoding, SplitOrder};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, StageError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub corpus: CorpusConfig,
    pub labels: LabelsConfig,
    pub workspace: WorkspaceConfig,
    pub split: SplitConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub root: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_CORPUS_ROOT),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    pub male: PathBuf,
    pub female: PathBuf,
    pub encoding: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            male: PathBuf::from(DEFAULT_MALE_LIST),
            female: PathBuf::from(DEFAULT_FEMALE_LIST),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub root: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_WORKSPACE_ROOT),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub test_interval: usize,
    pub order: SplitOrder,
    pub collision: CollisionPolicy,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_interval: DEFAULT_TEST_INTERVAL,
            order: SplitOrder::default(),
            collision: CollisionPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
    pub monitor: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| StageError::missing_input(path, e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StageError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_ROOT})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StageError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn corpus_root(&self) -> &Path {
        &self.corpus.root
    }

    fn male_list(&self) -> &Path {
        &self.labels.male
    }

    fn female_list(&self) -> &Path {
        &self.labels.female
    }

    fn label_encoding(&self) -> LabelEncoding {
        self.labels.encoding.parse().unwrap_or_default()
    }

    fn workspace_root(&self) -> &Path {
        &self.workspace.root
    }

    fn test_interval(&self) -> usize {
        self.split.test_interval
    }

    fn split_order(&self) -> SplitOrder {
        self.split.order
    }

    fn collision_policy(&self) -> CollisionPolicy {
        self.split.collision
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self, &self.labels.encoding)
    }
}
