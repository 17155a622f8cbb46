use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StageError {
    #[error("Missing input '{}': {source}", path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Filesystem write failed at '{}': {source}", path.display())]
    FilesystemWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Destination collision at '{}': '{}' and '{}' share a file name",
        destination.display(),
        first.display(),
        second.display()
    )]
    DestinationCollision {
        destination: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Reference list '{}' is not valid {encoding}", path.display())]
    Encoding { path: PathBuf, encoding: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corpus traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Filesystem,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl StageError {
    pub fn missing_input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::MissingInput {
            path: path.into(),
            source,
        }
    }

    pub fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FilesystemWrite {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingInput { .. } | Self::Encoding { .. } | Self::Walk(_) => {
                ErrorCategory::Input
            }
            Self::FilesystemWrite { .. }
            | Self::DestinationCollision { .. }
            | Self::Io(_)
            | Self::Serialization(_) => ErrorCategory::Filesystem,
            Self::ConfigError { .. } | Self::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Filesystem => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } => {
                "Check that the corpus root and both reference lists exist and are readable"
            }
            Self::FilesystemWrite { .. } | Self::Io(_) | Self::Serialization(_) => {
                "Check permissions and free space, then run `teardown` before staging again"
            }
            Self::DestinationCollision { .. } => {
                "Rename one of the files, or set the collision policy to `qualify` or `overwrite`"
            }
            Self::Encoding { .. } => "Set the label encoding to match the reference lists",
            Self::Walk(_) => "Check that every directory under the corpus root is readable",
            Self::ConfigError { .. } | Self::InvalidConfigValue { .. } => {
                "Fix the configuration value and run again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingInput { path, .. } => {
                format!("Input not found or unreadable: {}", path.display())
            }
            Self::FilesystemWrite { path, .. } => {
                format!(
                    "Could not write {}; the workspace may be partially populated",
                    path.display()
                )
            }
            Self::DestinationCollision { destination, .. } => format!(
                "Two images would be copied to {}; staging stopped",
                destination.display()
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StageError>;
