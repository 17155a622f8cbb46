use crate::domain::model::LabelEncoding;
use crate::utils::error::{StageError, Result};
use std::path::{Component, Path, PathBuf};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let as_text = path.to_string_lossy();

    if as_text.trim().is_empty() {
        return Err(StageError::InvalidConfigValue {
            field: field_name.to_string(),
            value: as_text.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if as_text.contains('\0') {
        return Err(StageError::InvalidConfigValue {
            field: field_name.to_string(),
            value: as_text.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(StageError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_encoding(field_name: &str, label: &str) -> Result<LabelEncoding> {
    label.parse::<LabelEncoding>().map_err(|_| StageError::InvalidConfigValue {
        field: field_name.to_string(),
        value: label.to_string(),
        reason: format!(
            "Unsupported encoding. Supported encodings: {}",
            LabelEncoding::SUPPORTED.join(", ")
        ),
    })
}

/// The workspace must not be the corpus itself or contain it; teardown would delete
/// the raw images. Both roots are compared after resolving symlinks and `..`.
pub fn validate_disjoint_roots(corpus_root: &Path, workspace_root: &Path) -> Result<()> {
    let corpus = resolve(corpus_root);
    let workspace = resolve(workspace_root);

    if corpus.starts_with(&workspace) {
        return Err(StageError::InvalidConfigValue {
            field: "workspace.root".to_string(),
            value: workspace_root.display().to_string(),
            reason: "Workspace must not contain the corpus root".to_string(),
        });
    }
    Ok(())
}

/// Absolute form of `path`: the deepest existing ancestor is canonicalized and the
/// not-yet-created remainder is appended lexically.
fn resolve(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    for ancestor in absolute.ancestors() {
        if let (Ok(canonical), Ok(tail)) = (ancestor.canonicalize(), absolute.strip_prefix(ancestor)) {
            return push_lexically(canonical, tail);
        }
    }
    push_lexically(PathBuf::new(), &absolute)
}

fn push_lexically(mut base: PathBuf, tail: &Path) -> PathBuf {
    for component in tail.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                base.pop();
            }
            other => base.push(other),
        }
    }
    base
}
