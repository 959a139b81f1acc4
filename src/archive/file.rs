//! Pack archive reader
//!
//! Runtime companion to [`ArchivePacker`](super::ArchivePacker): opens an
//! archive, resolves names through the perfect hash table, and serves
//! decompressed file contents.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use binrw::BinRead;
use tracing::debug;

use super::error::{PackError, PackResult};
use super::format::{FileRecord, PackIndex, header_size};
use crate::codec::Codec;
use crate::hash::PerfectHashTable;

/// An opened pack archive
///
/// Name resolution goes through the archive's minimal perfect hash table, so
/// a lookup is one hash plus two array indexes — no search. The table has no
/// membership test: asking for a name that was never packed returns *some*
/// file's contents. Callers are expected to request only names they packed.
#[derive(Debug)]
pub struct PackFile<C: Codec> {
    table: PerfectHashTable,
    files: Vec<FileRecord>,
    payload: Vec<u8>,
    codec: C,
}

impl<C: Codec> PackFile<C> {
    /// Parse an archive from its serialized bytes
    pub fn parse(data: &[u8], codec: C) -> PackResult<Self> {
        let mut cursor = Cursor::new(data);
        let index = PackIndex::read(&mut cursor)?;

        let num_files = index.header.num_files;
        if num_files <= 0 {
            return Err(PackError::InvalidFormat(format!(
                "Non-positive file count: {num_files}"
            )));
        }
        let expected = header_size(num_files as usize);
        if index.header.header_size as usize != expected {
            return Err(PackError::InvalidFormat(format!(
                "Header size {} does not match {} files (expected {expected})",
                index.header.header_size, num_files
            )));
        }

        // V must stay inside the file table or a lookup could index out of
        // bounds on a corrupt archive.
        for &value in &index.values {
            if value < 0 || value >= num_files {
                return Err(PackError::InvalidFormat(format!(
                    "Value table entry {value} out of range for {num_files} files"
                )));
            }
        }

        // Same for negative G entries: the direct-slot encoding `-(slot) - 1`
        // must decode to a slot inside the value table. Widen to i64 so
        // i32::MIN cannot overflow the negation.
        for &raw in &index.g {
            if raw < 0 {
                let slot = -i64::from(raw) - 1;
                if slot >= i64::from(num_files) {
                    return Err(PackError::InvalidFormat(format!(
                        "Displacement entry {raw} decodes to slot {slot}, past {num_files} slots"
                    )));
                }
            }
        }

        let payload = data[expected..].to_vec();
        for record in &index.files {
            if record.offset < 0 || record.compressed_size < 0 || record.original_size < 0 {
                return Err(PackError::InvalidFormat(
                    "Negative field in file table".to_string(),
                ));
            }
            let end = record.offset as usize + record.compressed_size as usize;
            if end > payload.len() {
                return Err(PackError::InvalidFormat(format!(
                    "File record ends at {end} but payload is {} bytes",
                    payload.len()
                )));
            }
        }

        debug!(files = num_files, payload_bytes = payload.len(), "archive opened");
        Ok(Self {
            table: PerfectHashTable::from_parts(index.g, index.values),
            files: index.files,
            payload,
            codec,
        })
    }

    /// Open and parse an archive file
    pub fn open(path: impl AsRef<Path>, codec: C) -> PackResult<Self> {
        let data = fs::read(path)?;
        Self::parse(&data, codec)
    }

    /// Number of files in the archive
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the archive holds no files (never true for a parsed archive)
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolve `name` to its file table index
    pub fn lookup(&self, name: &str) -> usize {
        self.table.lookup(name.as_bytes()) as usize
    }

    /// File table record for `name`
    pub fn record(&self, name: &str) -> &FileRecord {
        &self.files[self.lookup(name)]
    }

    /// Load and decompress the file packed under `name`
    ///
    /// The decompressed length is validated against the file table's
    /// recorded original size; a mismatch means the archive is corrupt or
    /// the name was never packed.
    pub fn load(&self, name: &str) -> PackResult<Vec<u8>> {
        let record = self.files[self.lookup(name)];
        let start = record.offset as usize;
        let compressed = &self.payload[start..start + record.compressed_size as usize];

        let content = self
            .codec
            .decompress(compressed, record.original_size as usize)?;
        if content.len() != record.original_size as usize {
            return Err(PackError::SizeMismatch {
                name: name.to_string(),
                expected: record.original_size as usize,
                actual: content.len(),
            });
        }
        Ok(content)
    }

    /// Load `len` bytes starting at `offset` of the decompressed content
    pub fn load_partial(&self, name: &str, offset: usize, len: usize) -> PackResult<Vec<u8>> {
        let content = self.load(name)?;
        let end = offset.checked_add(len).filter(|&end| end <= content.len());
        let Some(end) = end else {
            return Err(PackError::RangeOutOfBounds {
                name: name.to_string(),
                offset,
                len,
                size: content.len(),
            });
        };
        Ok(content[offset..end].to_vec())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::archive::ArchivePacker;
    use crate::codec::{Lz4Codec, NoCompression};
    use crate::manifest::{Manifest, ManifestEntry};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn packed_archive(contents: &[(&str, &[u8])]) -> Vec<u8> {
        let dir = tempfile::tempdir().expect("tempdir should succeed");
        let mut manifest = Manifest::new();
        for (i, (name, data)) in contents.iter().enumerate() {
            let path = dir.path().join(format!("input_{i}"));
            let mut file = fs::File::create(&path).expect("create should succeed");
            file.write_all(data).expect("write should succeed");
            manifest.push(ManifestEntry::new(*name, path));
        }
        let (archive, _) = ArchivePacker::new(Lz4Codec)
            .pack(&manifest)
            .expect("pack should succeed");
        archive
    }

    #[test]
    fn test_load_round_trip() {
        let archive = packed_archive(&[
            ("a", b"hello"),
            ("b", b"world!!"),
            ("c", b"a longer piece of content that lz4 can chew on"),
        ]);

        let pack = PackFile::parse(&archive, Lz4Codec).expect("parse should succeed");
        assert_eq!(pack.len(), 3);
        assert!(!pack.is_empty());
        assert_eq!(pack.record("a").original_size, 5);
        assert_eq!(pack.record("b").original_size, 7);
        assert_eq!(pack.load("a").expect("load should succeed"), b"hello");
        assert_eq!(pack.load("b").expect("load should succeed"), b"world!!");
        assert_eq!(
            pack.load("c").expect("load should succeed"),
            b"a longer piece of content that lz4 can chew on"
        );
    }

    #[test]
    fn test_lookup_indices_match_manifest_order() {
        let archive = packed_archive(&[("first", b"1"), ("second", b"2"), ("third", b"3")]);
        let pack = PackFile::parse(&archive, Lz4Codec).expect("parse should succeed");

        assert_eq!(pack.lookup("first"), 0);
        assert_eq!(pack.lookup("second"), 1);
        assert_eq!(pack.lookup("third"), 2);
    }

    #[test]
    fn test_load_partial() {
        let archive = packed_archive(&[("doc", b"0123456789")]);
        let pack = PackFile::parse(&archive, Lz4Codec).expect("parse should succeed");

        assert_eq!(
            pack.load_partial("doc", 2, 5).expect("load should succeed"),
            b"23456"
        );
        assert_eq!(
            pack.load_partial("doc", 0, 10).expect("load should succeed"),
            b"0123456789"
        );
    }

    #[test]
    fn test_load_partial_out_of_bounds() {
        let archive = packed_archive(&[("doc", b"0123456789")]);
        let pack = PackFile::parse(&archive, Lz4Codec).expect("parse should succeed");

        assert!(matches!(
            pack.load_partial("doc", 8, 5),
            Err(PackError::RangeOutOfBounds { .. })
        ));
        assert!(matches!(
            pack.load_partial("doc", usize::MAX, 1),
            Err(PackError::RangeOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_parse_truncated_archive() {
        let archive = packed_archive(&[("a", b"hello"), ("b", b"world")]);

        // Cut into the file table: binrw read fails.
        let result = PackFile::parse(&archive[..20], Lz4Codec);
        assert!(result.is_err());

        // Cut into the payload: record bounds check fails.
        let result = PackFile::parse(&archive[..archive.len() - 2], Lz4Codec);
        assert!(matches!(result, Err(PackError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_direct_slot_out_of_range() {
        let mut archive = packed_archive(&[("only", b"just me")]);

        // Overwrite G[0] (right after the 8-byte header) with a direct-slot
        // entry that decodes past the 1-entry value table.
        archive[8..12].copy_from_slice(&(-100i32).to_le_bytes());
        let result = PackFile::parse(&archive, Lz4Codec);
        assert!(matches!(result, Err(PackError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_zero_files_rejected() {
        let bytes = vec![8, 0, 0, 0, 0, 0, 0, 0];
        let result = PackFile::parse(&bytes, NoCompression);
        assert!(matches!(result, Err(PackError::InvalidFormat(_))));
    }

    #[test]
    fn test_single_file_archive() {
        let archive = packed_archive(&[("only", b"just me")]);
        let pack = PackFile::parse(&archive, Lz4Codec).expect("parse should succeed");

        assert_eq!(pack.len(), 1);
        assert_eq!(pack.lookup("only"), 0);
        assert_eq!(pack.load("only").expect("load should succeed"), b"just me");
    }
}
