//! Profile catalog: what a `.SOL` file contains.

use std::path::Path;

use crate::error::{Result, SolError};
use crate::scan;

/// One profile as listed from a file: its code and the raw block text.
///
/// `content` is verbatim, marker line included: it is the currency of
/// splice-preserving rewrites, where untouched blocks must survive
/// byte-identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEntry {
    /// 10-character profile code.
    pub code: String,
    /// Raw block text, marker line through the line before the next marker.
    pub content: String,
}

/// Reads a `.SOL` file into its line list.
pub(crate) fn read_sol_lines(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(SolError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|source| SolError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Lists every profile block in a `.SOL` file, in file order.
///
/// A file holding only a prologue (no profile markers) yields an empty list
/// rather than an error, so callers can warn instead of crash.
pub fn show_profiles(path: &Path) -> Result<Vec<ProfileEntry>> {
    let lines = read_sol_lines(path)?;
    let entries: Vec<ProfileEntry> = scan::profile_bounds(&lines)
        .into_iter()
        .map(|bounds| ProfileEntry {
            content: lines[bounds.start..bounds.end].join("\n"),
            code: bounds.code,
        })
        .collect();
    tracing::debug!(path = %path.display(), profiles = entries.len(), "listed soil file");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_show_profiles_lists_codes_and_blocks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("TEST.SOL");
        fs::write(
            &path,
            "*SOILS: General DSSAT Soil Input File\n\n\
             *AAAAAAAAAA  -99         SCL     180 -99\n\
             @SITE        COUNTRY          LAT     LONG SCS FAMILY\n\
              here        nowhere           1.000   2.000 -99\n\n\
             *BBBBBBBBBB  -99         SCL     100 -99\n\
             second block line\n",
        )
        .unwrap();

        let entries = show_profiles(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].code, "AAAAAAAAAA");
        assert_eq!(entries[1].code, "BBBBBBBBBB");
        assert!(entries[0].content.starts_with("*AAAAAAAAAA"));
        // Trailing separator line belongs to the preceding block
        assert!(entries[0].content.ends_with('\n'));
        assert!(entries[1].content.contains("second block line"));
    }

    #[test]
    fn test_show_profiles_prologue_only_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("EMPTY.SOL");
        fs::write(&path, "*SOILS: General DSSAT Soil Input File\n\ncomment\n").unwrap();

        let entries = show_profiles(&path).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_show_profiles_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = show_profiles(&dir.path().join("NOPE.SOL"));
        assert!(matches!(result, Err(SolError::FileNotFound { .. })));
    }
}
