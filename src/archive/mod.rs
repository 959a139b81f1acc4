//! Pack archive building and reading
//!
//! A pack archive is one blob holding a set of named, individually compressed
//! files, addressed by a minimal perfect hash table so any file is located by
//! name with a single computed index.
//!
//! ```text
//! Resolution flow:
//! name → PerfectHashTable → file table index → FileRecord → payload slice → codec → content
//! ```
//!
//! [`ArchivePacker`] produces archives from a [`Manifest`](crate::manifest::Manifest);
//! [`PackFile`] opens them and serves lookups. The wire layout lives in
//! [`format`].

mod error;
mod file;
pub mod format;
mod packer;

pub use error::{PackError, PackResult};
pub use file::PackFile;
pub use packer::{ArchivePacker, PackSummary};
