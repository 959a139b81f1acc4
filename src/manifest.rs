//! Input manifest parsing
//!
//! A manifest is a text file with one record per line: the given name (the
//! lookup key the archive is addressed by) and the filesystem path of the
//! bytes to pack, separated by a single tab. Blank lines are skipped.
//!
//! ```text
//! shaders/blur.hlsl	build/stripped/blur.hlsl
//! textures/noise.png	assets/textures/noise.png
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::{PackError, PackResult};

/// One manifest record: lookup name plus the path of the bytes to pack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Given name, used as the archive lookup key
    pub name: String,
    /// Filesystem location of the input bytes
    pub path: PathBuf,
}

impl ManifestEntry {
    /// Create a new manifest entry
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Ordered sequence of manifest entries
///
/// Order matters: entry positions become the archive's file table indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a manifest from entries, keeping their order
    pub fn from_entries(entries: impl IntoIterator<Item = ManifestEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Append an entry
    pub fn push(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    /// Parse manifest text
    ///
    /// Each non-blank line must be `name<TAB>path` with both fields
    /// non-empty. Errors carry the 1-based line number.
    pub fn parse(text: &str) -> PackResult<Self> {
        let mut entries = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let Some((name, path)) = line.split_once('\t') else {
                return Err(PackError::InvalidManifest {
                    line: idx + 1,
                    reason: "expected tab-separated name and path".to_string(),
                });
            };
            if name.is_empty() {
                return Err(PackError::InvalidManifest {
                    line: idx + 1,
                    reason: "empty name field".to_string(),
                });
            }
            if path.is_empty() {
                return Err(PackError::InvalidManifest {
                    line: idx + 1,
                    reason: "empty path field".to_string(),
                });
            }

            entries.push(ManifestEntry::new(name, path));
        }
        Ok(Self { entries })
    }

    /// Read and parse a manifest file
    pub fn load(path: impl AsRef<Path>) -> PackResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| PackError::MissingInput {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Entries in manifest order
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the manifest has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_basic() {
        let manifest = Manifest::parse("a.txt\t/tmp/a.txt\nb.txt\t/tmp/b.txt\n")
            .expect("parse should succeed");
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.entries()[0], ManifestEntry::new("a.txt", "/tmp/a.txt"));
        assert_eq!(manifest.entries()[1], ManifestEntry::new("b.txt", "/tmp/b.txt"));
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let manifest =
            Manifest::parse("\na.txt\t/tmp/a.txt\n\n  \nb.txt\t/tmp/b.txt\n\n").expect("parse should succeed");
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn test_parse_crlf() {
        let manifest = Manifest::parse("a.txt\t/tmp/a.txt\r\n").expect("parse should succeed");
        assert_eq!(manifest.entries()[0].path, PathBuf::from("/tmp/a.txt"));
    }

    #[test]
    fn test_parse_missing_tab() {
        let result = Manifest::parse("a.txt /tmp/a.txt\n");
        assert!(matches!(result, Err(PackError::InvalidManifest { line: 1, .. })));
    }

    #[test]
    fn test_parse_empty_fields() {
        assert!(matches!(
            Manifest::parse("\t/tmp/a.txt\n"),
            Err(PackError::InvalidManifest { line: 1, .. })
        ));
        assert!(matches!(
            Manifest::parse("ok.txt\t/tmp/ok\nname\t\n"),
            Err(PackError::InvalidManifest { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_keeps_order() {
        let manifest =
            Manifest::parse("z\t/z\na\t/a\nm\t/m\n").expect("parse should succeed");
        let names: Vec<&str> = manifest.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_path_may_contain_tabs_only_in_first_split() {
        // Only the first tab separates fields; later tabs belong to the path.
        let manifest = Manifest::parse("name\t/odd\tpath\n").expect("parse should succeed");
        assert_eq!(manifest.entries()[0].path, PathBuf::from("/odd\tpath"));
    }
}
