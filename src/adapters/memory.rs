use crate::domain::ports::Storage;
use crate::utils::error::{Result, StageError};
use std::collections::{BTreeSet, HashMap};
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    CreateDir(PathBuf),
    Copy(PathBuf, PathBuf),
    RemoveAll(PathBuf),
}

#[derive(Default)]
struct State {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    ops: Vec<Op>,
}

/// In-memory storage that records every mutation in order.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<State>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, data: &[u8]) -> Self {
        self.state.lock().unwrap().files.insert(path.into(), data.to_vec());
        self
    }

    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.state.lock().unwrap().dirs.insert(path.into());
        self
    }

    pub fn ops(&self) -> Vec<Op> {
        self.state.lock().unwrap().ops.clone()
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.state.lock().unwrap().files.get(path.as_ref()).cloned()
    }

    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.state.lock().unwrap().dirs.contains(path.as_ref())
    }
}

fn parent_present(state: &State, path: &Path) -> bool {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => state.dirs.contains(parent),
        _ => true,
    }
}

impl Storage for MemoryStorage {
    async fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        state.dirs.contains(path) || state.files.contains_key(path)
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        self.file(path)
            .ok_or_else(|| StageError::missing_input(path, Error::from(ErrorKind::NotFound)))
    }

    async fn create_dir(&self, path: &Path) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !parent_present(&state, path) || state.dirs.contains(path) {
            return Err(StageError::write_failure(path, Error::from(ErrorKind::Other)));
        }
        state.dirs.insert(path.to_path_buf());
        state.ops.push(Op::CreateDir(path.to_path_buf()));
        Ok(())
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        for ancestor in path.ancestors().filter(|a| !a.as_os_str().is_empty()) {
            state.dirs.insert(ancestor.to_path_buf());
        }
        state.ops.push(Op::CreateDir(path.to_path_buf()));
        Ok(())
    }

    async fn remove_dir_all(&self, path: &Path) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.dirs.retain(|d| !d.starts_with(path));
        state.files.retain(|f, _| !f.starts_with(path));
        state.ops.push(Op::RemoveAll(path.to_path_buf()));
        Ok(())
    }

    async fn copy_file(&self, source: &Path, destination: &Path) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        let data = state
            .files
            .get(source)
            .cloned()
            .ok_or_else(|| StageError::missing_input(source, Error::from(ErrorKind::NotFound)))?;
        if !parent_present(&state, destination) {
            return Err(StageError::write_failure(destination, Error::from(ErrorKind::NotFound)));
        }
        let len = data.len() as u64;
        state.files.insert(destination.to_path_buf(), data);
        state
            .ops
            .push(Op::Copy(source.to_path_buf(), destination.to_path_buf()));
        Ok(len)
    }
}
