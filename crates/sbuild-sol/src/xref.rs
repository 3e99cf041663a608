//! Cross-reference search: which experiment files use a soil profile.
//!
//! DSSAT experiment files carry a crop-specific extension whose middle
//! letter is `X` (`.MZX` maize, `.SBX` soybean, …). Simulations reference
//! soil profiles by code, so a recursive text search over those files shows
//! where a profile is in use before it gets edited or deleted.

use std::path::{Path, PathBuf};

use crate::error::{Result, SolError};

/// Recursively searches `root` for experiment files whose text mentions
/// `code` (case-insensitive). Returns the matching paths sorted.
///
/// Files that cannot be read are skipped with a debug log rather than
/// aborting the search.
pub fn find_profile_references(root: &Path, code: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(SolError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let needle = code.to_ascii_uppercase();
    let mut matches = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::debug!(path = %dir.display(), %error, "skipping unreadable directory");
                continue;
            }
        };
        for entry in entries {
            let entry = entry.map_err(|source| SolError::DirectoryRead {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            if !is_experiment_file(&path) {
                continue;
            }
            match std::fs::read(&path) {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes);
                    if text.to_ascii_uppercase().contains(&needle) {
                        matches.push(path);
                    }
                }
                Err(error) => {
                    tracing::debug!(path = %path.display(), %error, "skipping unreadable file");
                }
            }
        }
    }

    matches.sort();
    tracing::debug!(code, hits = matches.len(), "searched experiment files");
    Ok(matches)
}

/// True for a 3-character extension with `X` in the middle.
fn is_experiment_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let bytes = ext.as_bytes();
            bytes.len() == 3 && bytes[1].eq_ignore_ascii_case(&b'X')
        })
}
