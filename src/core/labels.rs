use crate::domain::model::{LabelEncoding, ReferenceLabels};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, StageError};
use std::collections::HashSet;
use std::path::Path;

/// Reads both reference lists once. Missing or unreadable files fail with `MissingInput`.
pub async fn load_reference_labels<S: Storage>(
    storage: &S,
    male_list: &Path,
    female_list: &Path,
    encoding: LabelEncoding,
) -> Result<ReferenceLabels> {
    let male = load_name_list(storage, male_list, encoding).await?;
    let female = load_name_list(storage, female_list, encoding).await?;

    tracing::info!(
        "Loaded reference lists: {} male, {} female names",
        male.len(),
        female.len()
    );

    let labels = ReferenceLabels::new(male, female);
    let overlap = labels.overlap();
    if !overlap.is_empty() {
        tracing::warn!(
            "{} file names appear in both reference lists and will resolve as male",
            overlap.len()
        );
        tracing::debug!("Overlapping names: {:?}", overlap);
    }

    Ok(labels)
}

async fn load_name_list<S: Storage>(
    storage: &S,
    path: &Path,
    encoding: LabelEncoding,
) -> Result<HashSet<String>> {
    let bytes = storage.read_file(path).await?;
    let text = decode(&bytes, encoding).ok_or_else(|| StageError::Encoding {
        path: path.to_path_buf(),
        encoding: encoding.to_string(),
    })?;
    Ok(parse_name_list(&text))
}

/// One trimmed name per non-blank line.
pub fn parse_name_list(text: &str) -> HashSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn decode(bytes: &[u8], encoding: LabelEncoding) -> Option<String> {
    match encoding {
        LabelEncoding::Utf8 => {
            let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
            String::from_utf8(bytes.to_vec()).ok()
        }
        // Every byte maps to the code point of the same value.
        LabelEncoding::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
    }
}
