//! Pack archive wire format
//!
//! The archive is a fixed little-endian layout, read back by a plain struct
//! load on the consumer side:
//!
//! ```text
//! offset 0:     i32 header_size      // bytes of header + tables before payload
//! offset 4:     i32 num_files        // N
//! offset 8:     i32[N]               // displacement table G
//! offset 8+4N:  i32[N]               // value table V
//! offset 8+8N:  { i32 offset, i32 compressed_size, i32 original_size }[N]
//!               // file table, in manifest order
//! offset header_size: payload        // N compressed blobs, manifest order
//! ```
//!
//! Lookup at read time is `idx = table.lookup(name)` followed by a direct
//! index into the file table; payload bytes for a file live at
//! `header_size + offset .. header_size + offset + compressed_size`.

use binrw::binrw;

/// Fixed header bytes before the tables
pub const HEADER_FIXED_SIZE: usize = 8;

/// Serialized size of one file table record
pub const FILE_RECORD_SIZE: usize = 12;

/// Total header + table bytes for an archive of `num_files` entries
///
/// Two `i32` header fields, two `i32[N]` hash tables, and the 12-byte file
/// records.
pub fn header_size(num_files: usize) -> usize {
    HEADER_FIXED_SIZE + num_files * (4 + 4 + FILE_RECORD_SIZE)
}

/// Archive header
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackHeader {
    /// Bytes of header + tables before the payload
    pub header_size: i32,
    /// Number of files in the archive
    pub num_files: i32,
}

/// One file table record
///
/// `offset` is relative to the start of the payload region. Records appear in
/// manifest order and exactly partition the payload: each record's offset is
/// the previous record's offset plus its compressed size.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRecord {
    /// Byte offset within the payload region
    pub offset: i32,
    /// Compressed size in bytes
    pub compressed_size: i32,
    /// Original (decompressed) size in bytes
    pub original_size: i32,
}

/// Header and tables of an archive, everything before the payload
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackIndex {
    /// Fixed header
    pub header: PackHeader,
    /// Displacement table G, wire form
    #[br(count = header.num_files as usize)]
    pub g: Vec<i32>,
    /// Value table V
    #[br(count = header.num_files as usize)]
    pub values: Vec<i32>,
    /// File table, manifest order
    #[br(count = header.num_files as usize)]
    pub files: Vec<FileRecord>,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use binrw::{BinRead, BinWrite};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_header_size_arithmetic() {
        assert_eq!(header_size(0), 8);
        assert_eq!(header_size(1), 8 + 20);
        assert_eq!(header_size(3), 8 + 60);
    }

    #[test]
    fn test_header_little_endian_layout() {
        let header = PackHeader {
            header_size: 28,
            num_files: 1,
        };

        let mut buf = Cursor::new(Vec::new());
        header.write(&mut buf).expect("write should succeed");
        assert_eq!(
            buf.into_inner(),
            vec![28, 0, 0, 0, 1, 0, 0, 0],
        );
    }

    #[test]
    fn test_index_round_trip() {
        let index = PackIndex {
            header: PackHeader {
                header_size: header_size(2) as i32,
                num_files: 2,
            },
            g: vec![-1, 2],
            values: vec![1, 0],
            files: vec![
                FileRecord {
                    offset: 0,
                    compressed_size: 10,
                    original_size: 20,
                },
                FileRecord {
                    offset: 10,
                    compressed_size: 5,
                    original_size: 5,
                },
            ],
        };

        let mut buf = Cursor::new(Vec::new());
        index.write(&mut buf).expect("write should succeed");
        let bytes = buf.into_inner();
        assert_eq!(bytes.len(), header_size(2));

        let parsed =
            PackIndex::read(&mut Cursor::new(bytes)).expect("read should succeed");
        assert_eq!(parsed, index);
    }
}
