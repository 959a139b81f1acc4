//! Read-only resource archives with minimal perfect hash lookup
//!
//! `respack` compresses a manifest of named input files into a single
//! archive blob and indexes it with a minimal perfect hash table, so any
//! file can be located by name at load time with one computed index — no
//! search, no collision chains, no wasted slots.
//!
//! # Components
//!
//! - [`hash`] — seeded hash family, perfect hash construction
//!   (compress-hash-and-displace), and the lookup table
//! - [`codec`] — pluggable byte compression (LZ4, zlib, pass-through)
//! - [`manifest`] — tab-separated input manifest parsing
//! - [`archive`] — the wire format, the packing pipeline, and the reader
//!
//! # Packing and loading
//!
//! ```rust,no_run
//! use respack::archive::{ArchivePacker, PackFile};
//! use respack::codec::Lz4Codec;
//! use respack::manifest::Manifest;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = Manifest::load("resources.manifest")?;
//! ArchivePacker::new(Lz4Codec).pack_to_file(&manifest, "resources.pak")?;
//!
//! let pack = PackFile::open("resources.pak", Lz4Codec)?;
//! let bytes = pack.load("shaders/blur.hlsl")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: re-running a build with unchanged inputs produces a
//!   byte-identical archive.
//! - **All-or-nothing**: either a complete, internally consistent archive is
//!   written, or none is.
//! - **Bounded construction**: the displacement search fails hard past a
//!   seed ceiling instead of looping forever on pathological key sets.

#![warn(missing_docs)]

pub mod archive;
pub mod codec;
pub mod hash;
pub mod manifest;

pub use archive::{ArchivePacker, PackError, PackFile, PackResult, PackSummary};
pub use manifest::{Manifest, ManifestEntry};
