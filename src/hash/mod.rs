//! Minimal perfect hashing over a fixed key set
//!
//! This module builds and evaluates minimal perfect hash tables: every key in
//! a fixed set maps to a distinct index in `0..N` with no collisions and no
//! unused slots, so a resource archive can locate any file by name with one
//! computed index.
//!
//! Construction is a compress-hash-and-displace variant. Keys collide into
//! buckets under a base hash; each multi-key bucket searches for a seed that
//! re-hashes its members into free slots, and singleton buckets take leftover
//! slots directly via a negative-encoded displacement entry.
//!
//! # Usage
//!
//! ```rust
//! use respack::hash::PerfectHashBuilder;
//!
//! let table = PerfectHashBuilder::from_keys(["a.png", "b.png", "c.png"]).build()?;
//!
//! assert_eq!(table.lookup(b"b.png"), 1);
//! # Ok::<(), respack::hash::HashError>(())
//! ```

mod builder;
mod error;
mod fnv;
mod table;

pub use builder::{MAX_SEED_ATTEMPTS, PerfectHashBuilder};
pub use error::{HashError, HashResult};
pub use fnv::{FNV_BASIS, fnv_hash};
pub use table::{Displacement, PerfectHashTable};
