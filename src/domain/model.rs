use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Train,
    Test,
}

impl Role {
    pub fn dir_name(self) -> &'static str {
        match self {
            Role::Train => "train",
            Role::Test => "test",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn dir_name(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Bare-filename reference lists, one per gender.
#[derive(Debug, Clone, Default)]
pub struct ReferenceLabels {
    pub male: HashSet<String>,
    pub female: HashSet<String>,
}

impl ReferenceLabels {
    pub fn new(male: HashSet<String>, female: HashSet<String>) -> Self {
        Self { male, female }
    }

    /// Male wins when a name appears in both lists.
    pub fn resolve(&self, file_name: &str) -> Option<Gender> {
        if self.male.contains(file_name) {
            Some(Gender::Male)
        } else if self.female.contains(file_name) {
            Some(Gender::Female)
        } else {
            None
        }
    }

    pub fn overlap(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .male
            .intersection(&self.female)
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImageRecord {
    pub file_name: String,
    pub source_path: PathBuf,
    /// Parent directory name; `None` for files sitting directly in the corpus root.
    pub identity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityGroup {
    pub identity: String,
    pub images: Vec<PathBuf>,
}

/// Both views of one corpus traversal.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    pub records: Vec<RawImageRecord>,
    pub identities: Vec<IdentityGroup>,
}

impl CorpusIndex {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SplitOrder {
    /// Whatever the directory enumeration yields.
    #[default]
    Filesystem,
    Lexicographic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum CollisionPolicy {
    #[default]
    Fail,
    Overwrite,
    Qualify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelEncoding {
    #[default]
    Utf8,
    Latin1,
}

impl LabelEncoding {
    pub const SUPPORTED: [&'static str; 5] = ["utf8", "utf-8", "latin1", "latin-1", "iso-8859-1"];
}

impl FromStr for LabelEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(LabelEncoding::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(LabelEncoding::Latin1),
            other => Err(format!("unsupported encoding: {}", other)),
        }
    }
}

impl fmt::Display for LabelEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelEncoding::Utf8 => write!(f, "utf-8"),
            LabelEncoding::Latin1 => write!(f, "iso-8859-1"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep {
    CreateDir(PathBuf),
    Copy(Placement),
}

/// Everything a partitioner decided, in execution order, before any byte is copied.
#[derive(Debug, Clone, Default)]
pub struct PartitionPlan {
    pub steps: Vec<PlanStep>,
    pub skipped: Vec<RawImageRecord>,
}

impl PartitionPlan {
    pub fn create_dir(&mut self, path: PathBuf) {
        self.steps.push(PlanStep::CreateDir(path));
    }

    pub fn copy(&mut self, source: PathBuf, destination: PathBuf, role: Role) {
        self.steps.push(PlanStep::Copy(Placement {
            source,
            destination,
            role,
        }));
    }

    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.steps.iter().filter_map(|step| match step {
            PlanStep::Copy(placement) => Some(placement),
            PlanStep::CreateDir(_) => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &Path> {
        self.steps.iter().filter_map(|step| match step {
            PlanStep::CreateDir(path) => Some(path.as_path()),
            PlanStep::Copy(_) => None,
        })
    }

    pub fn count(&self, role: Role) -> usize {
        self.placements().filter(|p| p.role == role).count()
    }
}

/// Fixed relative layout of the staged workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    root: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn genders_dir(&self) -> PathBuf {
        self.root.join("genders")
    }

    pub fn gender_role_dir(&self, role: Role) -> PathBuf {
        self.genders_dir().join(role.dir_name())
    }

    pub fn gender_dir(&self, role: Role, gender: Gender) -> PathBuf {
        self.gender_role_dir(role).join(gender.dir_name())
    }

    pub fn individuals_dir(&self) -> PathBuf {
        self.root.join("individuals")
    }

    pub fn individuals_role_dir(&self, role: Role) -> PathBuf {
        self.individuals_dir().join(role.dir_name())
    }

    pub fn identity_dir(&self, role: Role, identity: &str) -> PathBuf {
        self.individuals_role_dir(role).join(identity)
    }

    /// Skeleton directories below the root, parents before children.
    pub fn skeleton(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.genders_dir()];
        for role in [Role::Train, Role::Test] {
            dirs.push(self.gender_role_dir(role));
            dirs.push(self.gender_dir(role, Gender::Male));
            dirs.push(self.gender_dir(role, Gender::Female));
        }
        dirs.push(self.individuals_dir());
        dirs.push(self.individuals_role_dir(Role::Train));
        dirs.push(self.individuals_role_dir(Role::Test));
        dirs
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseSummary {
    pub phase: String,
    pub train: usize,
    pub test: usize,
    pub skipped: usize,
    pub directories: usize,
}

impl PhaseSummary {
    pub fn from_plan(phase: &str, plan: &PartitionPlan) -> Self {
        Self {
            phase: phase.to_string(),
            train: plan.count(Role::Train),
            test: plan.count(Role::Test),
            skipped: plan.skipped.len(),
            directories: plan.directories().count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    pub workspace: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub already_staged: bool,
    pub phases: Vec<PhaseSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(male: &[&str], female: &[&str]) -> ReferenceLabels {
        ReferenceLabels::new(
            male.iter().map(|s| s.to_string()).collect(),
            female.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_resolve_prefers_male() {
        let labels = labels(&["a.jpg", "both.jpg"], &["b.jpg", "both.jpg"]);
        assert_eq!(labels.resolve("a.jpg"), Some(Gender::Male));
        assert_eq!(labels.resolve("b.jpg"), Some(Gender::Female));
        assert_eq!(labels.resolve("both.jpg"), Some(Gender::Male));
        assert_eq!(labels.resolve("c.jpg"), None);
        assert_eq!(labels.overlap(), vec!["both.jpg"]);
    }

    #[test]
    fn test_skeleton_lists_parents_first() {
        let layout = WorkspaceLayout::new("tmp");
        let skeleton = layout.skeleton();

        assert_eq!(skeleton.len(), 10);
        assert_eq!(skeleton[0], PathBuf::from("tmp/genders"));
        assert!(skeleton.contains(&PathBuf::from("tmp/genders/test/female")));
        assert_eq!(skeleton[9], PathBuf::from("tmp/individuals/test"));
        for (i, dir) in skeleton.iter().enumerate() {
            let parent = dir.parent().unwrap();
            assert!(parent == layout.root() || skeleton[..i].iter().any(|d| d == parent));
        }
    }

    #[test]
    fn test_plan_counts_by_role() {
        let mut plan = PartitionPlan::default();
        plan.create_dir(PathBuf::from("tmp/individuals/test/ann"));
        plan.copy("a.jpg".into(), "tmp/individuals/test/ann/a.jpg".into(), Role::Test);
        plan.copy("b.jpg".into(), "tmp/individuals/train/ann/b.jpg".into(), Role::Train);
        plan.copy("c.jpg".into(), "tmp/individuals/train/ann/c.jpg".into(), Role::Train);

        assert_eq!(plan.count(Role::Test), 1);
        assert_eq!(plan.count(Role::Train), 2);
        assert_eq!(plan.directories().count(), 1);
    }

    #[test]
    fn test_encoding_labels() {
        assert_eq!("UTF-8".parse::<LabelEncoding>(), Ok(LabelEncoding::Utf8));
        assert_eq!("latin1".parse::<LabelEncoding>(), Ok(LabelEncoding::Latin1));
        assert!("utf16".parse::<LabelEncoding>().is_err());
    }
}
