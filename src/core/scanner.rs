use crate::domain::model::{CorpusIndex, IdentityGroup, RawImageRecord, SplitOrder};
use crate::utils::error::{Result, StageError};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Read-only traversal of an identity-per-folder corpus.
#[derive(Debug, Clone)]
pub struct CorpusScanner {
    root: PathBuf,
    order: SplitOrder,
}

impl CorpusScanner {
    pub fn new(root: impl Into<PathBuf>, order: SplitOrder) -> Self {
        Self {
            root: root.into(),
            order,
        }
    }

    pub fn scan(&self) -> Result<CorpusIndex> {
        self.check_root()?;

        let index = CorpusIndex {
            records: self.flat_view()?,
            identities: self.grouped_view()?,
        };
        tracing::info!(
            "Scanned corpus {}: {} images across {} identities",
            self.root.display(),
            index.records.len(),
            index.identities.len()
        );
        Ok(index)
    }

    /// Every file at any depth, in traversal order.
    pub fn flat_view(&self) -> Result<Vec<RawImageRecord>> {
        let root_name = self.root_name();
        let mut records = Vec::new();

        for entry in self.walker(&self.root, usize::MAX) {
            let entry = entry?;
            if !is_image_file(&entry) {
                continue;
            }

            let identity = if entry.depth() == 1 {
                None
            } else {
                let parent = entry.path().parent().unwrap_or(&self.root);
                parent
                    .file_name()
                    .filter(|name| Some(*name) != root_name.as_deref())
                    .map(|name| utf8_name(parent, name))
                    .transpose()?
            };

            records.push(RawImageRecord {
                file_name: utf8_name(entry.path(), entry.file_name())?,
                source_path: entry.path().to_path_buf(),
                identity,
            });
        }

        Ok(records)
    }

    /// One group per immediate subdirectory, holding that directory's own files.
    pub fn grouped_view(&self) -> Result<Vec<IdentityGroup>> {
        let root_name = self.root_name();
        let mut groups = Vec::new();

        for entry in self.walker(&self.root, 1) {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }
            if Some(entry.file_name()) == root_name.as_deref() {
                tracing::debug!(
                    "Skipping {}: same name as the corpus root",
                    entry.path().display()
                );
                continue;
            }

            let mut images = Vec::new();
            for file in self.walker(entry.path(), 1) {
                let file = file?;
                if is_image_file(&file) {
                    utf8_name(file.path(), file.file_name())?;
                    images.push(file.into_path());
                }
            }

            groups.push(IdentityGroup {
                identity: utf8_name(entry.path(), entry.file_name())?,
                images,
            });
        }

        Ok(groups)
    }

    fn check_root(&self) -> Result<()> {
        let metadata = std::fs::metadata(&self.root)
            .map_err(|e| StageError::missing_input(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(StageError::missing_input(
                &self.root,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "corpus root is not a directory",
                ),
            ));
        }
        Ok(())
    }

    fn root_name(&self) -> Option<OsString> {
        self.root.file_name().map(|name| name.to_os_string())
    }

    fn walker(&self, dir: &Path, max_depth: usize) -> walkdir::IntoIter {
        let walker = WalkDir::new(dir).min_depth(1).max_depth(max_depth);
        match self.order {
            SplitOrder::Filesystem => walker.into_iter(),
            SplitOrder::Lexicographic => walker.sort_by_file_name().into_iter(),
        }
    }
}

/// Names become destination paths and label lookups, so they must survive unchanged.
fn utf8_name(path: &Path, name: &OsStr) -> Result<String> {
    name.to_str().map(str::to_string).ok_or_else(|| {
        StageError::missing_input(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, "name is not valid UTF-8"),
        )
    })
}

fn is_image_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}
