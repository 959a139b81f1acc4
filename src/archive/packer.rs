//! Archive packing pipeline
//!
//! `ArchivePacker` turns a manifest of named input files into one archive
//! blob: it builds a minimal perfect hash over the given names, compresses
//! each file with the injected codec, assigns payload offsets as a running
//! sum in manifest order, and serializes header, hash tables, file table, and
//! payload in one pass.
//!
//! Packing is all-or-nothing. The archive is assembled fully in memory and
//! only written to disk once every file has compressed successfully, so a
//! failed build never leaves a partial archive behind.

use std::collections::HashSet;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use binrw::BinWrite;
use tracing::{debug, info};

use super::error::{PackError, PackResult};
use super::format::{FileRecord, PackHeader, PackIndex, header_size};
use crate::codec::Codec;
use crate::hash::PerfectHashBuilder;
use crate::manifest::Manifest;

/// Largest value the signed 32-bit wire fields can carry
const WIRE_SIZE_LIMIT: u64 = i32::MAX as u64;

/// Totals for one completed pack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackSummary {
    /// Number of files packed
    pub files: usize,
    /// Sum of input sizes in bytes
    pub original_bytes: u64,
    /// Sum of compressed sizes in bytes
    pub compressed_bytes: u64,
}

/// Builder for pack archives
///
/// # Example
///
/// ```rust,no_run
/// use respack::archive::ArchivePacker;
/// use respack::codec::Lz4Codec;
/// use respack::manifest::Manifest;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let manifest = Manifest::load("resources.manifest")?;
/// let summary = ArchivePacker::new(Lz4Codec).pack_to_file(&manifest, "resources.pak")?;
/// println!("packed {} files", summary.files);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ArchivePacker<C: Codec> {
    codec: C,
}

impl<C: Codec> ArchivePacker<C> {
    /// Create a packer using `codec` for every file
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Pack `manifest` into an in-memory archive
    ///
    /// Returns the serialized archive bytes and the pack totals. Fails fast
    /// on an empty manifest or duplicate names, before any file is read.
    pub fn pack(&self, manifest: &Manifest) -> PackResult<(Vec<u8>, PackSummary)> {
        let entries = manifest.entries();
        if entries.is_empty() {
            return Err(PackError::EmptyManifest);
        }

        // Duplicate names would make the name -> index mapping ill-defined,
        // so reject them before any compression work begins.
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(PackError::DuplicateName(entry.name.clone()));
            }
        }

        let table = PerfectHashBuilder::from_keys(entries.iter().map(|e| e.name.as_bytes()))
            .build()?;

        let mut files = Vec::with_capacity(entries.len());
        let mut payload = Vec::new();
        let mut original_bytes = 0u64;

        for entry in entries {
            let raw = fs::read(&entry.path).map_err(|source| PackError::MissingInput {
                path: entry.path.clone(),
                source,
            })?;
            let compressed = self.codec.compress(&raw)?;

            let offset = payload.len() as u64;
            let end = offset + compressed.len() as u64;
            if raw.len() as u64 > WIRE_SIZE_LIMIT || end > WIRE_SIZE_LIMIT {
                return Err(PackError::TooLarge {
                    size: end.max(raw.len() as u64),
                    limit: WIRE_SIZE_LIMIT,
                });
            }

            debug!(
                name = %entry.name,
                codec = self.codec.name(),
                original = raw.len(),
                compressed = compressed.len(),
                "packed file"
            );

            files.push(FileRecord {
                offset: offset as i32,
                compressed_size: compressed.len() as i32,
                original_size: raw.len() as i32,
            });
            payload.extend_from_slice(&compressed);
            original_bytes += raw.len() as u64;
        }

        let num_files = entries.len();
        let index = PackIndex {
            header: PackHeader {
                header_size: header_size(num_files) as i32,
                num_files: num_files as i32,
            },
            g: table.displacements().to_vec(),
            values: table.values().to_vec(),
            files,
        };

        let mut out = Cursor::new(Vec::with_capacity(header_size(num_files) + payload.len()));
        index.write(&mut out)?;
        let mut archive = out.into_inner();
        archive.extend_from_slice(&payload);

        let summary = PackSummary {
            files: num_files,
            original_bytes,
            compressed_bytes: payload.len() as u64,
        };
        info!(
            files = summary.files,
            original_bytes = summary.original_bytes,
            compressed_bytes = summary.compressed_bytes,
            "archive packed"
        );

        Ok((archive, summary))
    }

    /// Pack `manifest` and write the archive to `path`
    ///
    /// The file is only created after the whole archive has been assembled;
    /// no partial archive is ever written.
    pub fn pack_to_file(&self, manifest: &Manifest, path: impl AsRef<Path>) -> PackResult<PackSummary> {
        let (archive, summary) = self.pack(manifest)?;
        fs::write(path, archive)?;
        Ok(summary)
    }
}
