pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::LocalStorage;
pub use app::{run_command, Command, RunOptions};
pub use crate::core::engine::StagingEngine;
pub use domain::model::{CollisionPolicy, Gender, Role, SplitOrder, StageReport};
pub use utils::error::{Result, StageError};
