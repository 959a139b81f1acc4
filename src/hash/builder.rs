//! Minimal perfect hash construction
//!
//! Compress-hash-and-displace variant: keys are grouped into buckets by their
//! base hash residue, the largest buckets are resolved first by searching for
//! a seed that drops every member into a free value slot, and whatever
//! buckets remain are singletons that take leftover slots directly. The
//! result is a table where every key maps to a distinct index in `0..N` with
//! no unused slots.

use std::cmp::Reverse;
use std::collections::HashSet;

use tracing::debug;

use super::error::{HashError, HashResult};
use super::fnv::fnv_hash;
use super::table::{Displacement, PerfectHashTable};

/// Seed ceiling for the per-bucket displacement search
///
/// The expected displacement for a well-distributed string key set is tiny
/// (single digits for typical bucket sizes), so hitting this ceiling means
/// the key set is pathological. Failing hard here bounds worst-case build
/// time instead of looping forever.
pub const MAX_SEED_ATTEMPTS: u32 = 100_000;

/// Builder for [`PerfectHashTable`]
///
/// Keys are assigned values by insertion order: the first added key maps to
/// `0`, the second to `1`, and so on. Construction is a pure function of the
/// key sequence, so two builds over the same keys produce byte-identical
/// tables.
///
/// # Example
///
/// ```rust
/// use respack::hash::PerfectHashBuilder;
///
/// let mut builder = PerfectHashBuilder::new();
/// builder.add_key("textures/stone.dds");
/// builder.add_key("meshes/crate.obj");
///
/// let table = builder.build()?;
/// assert_eq!(table.lookup(b"textures/stone.dds"), 0);
/// assert_eq!(table.lookup(b"meshes/crate.obj"), 1);
/// # Ok::<(), respack::hash::HashError>(())
/// ```
#[derive(Debug, Default)]
pub struct PerfectHashBuilder {
    keys: Vec<Vec<u8>>,
}

impl PerfectHashBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key; its value is the number of keys added before it
    pub fn add_key(&mut self, key: impl Into<Vec<u8>>) -> &mut Self {
        self.keys.push(key.into());
        self
    }

    /// Build a builder pre-loaded with `keys` in order
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Vec<u8>>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of keys added so far
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if no keys have been added
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Run the displacement construction and produce the table
    ///
    /// Fails on an empty or duplicate-bearing key set, or if any bucket's
    /// seed search exceeds [`MAX_SEED_ATTEMPTS`].
    pub fn build(self) -> HashResult<PerfectHashTable> {
        let n = self.keys.len();
        if n == 0 {
            return Err(HashError::EmptyKeySet);
        }

        let mut seen = HashSet::with_capacity(n);
        for key in &self.keys {
            if !seen.insert(key.as_slice()) {
                return Err(HashError::DuplicateKey(
                    String::from_utf8_lossy(key).into_owned(),
                ));
            }
        }

        // Group keys by base hash residue. The bucket index doubles as the
        // G index every member of the bucket resolves through.
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (value, key) in self.keys.iter().enumerate() {
            buckets[fnv_hash(0, key) as usize % n].push(value);
        }

        // Largest buckets first; they are the hardest to place. The sort is
        // stable, so ties keep bucket-index order and builds stay
        // reproducible.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&b| Reverse(buckets[b].len()));

        let mut g = vec![0i32; n];
        let mut values = vec![0i32; n];
        let mut claimed = vec![false; n];
        let mut max_seed = 0u32;

        // Phase one: displacement search for every bucket of two or more
        // keys. A seed is accepted only if it places the whole bucket into
        // slots that are free and mutually distinct; a partial fit discards
        // the attempt entirely.
        let mut slots = Vec::new();
        for &b in &order {
            let bucket = &buckets[b];
            if bucket.len() < 2 {
                break;
            }

            let mut seed = 1u32;
            loop {
                slots.clear();
                let fits = bucket.iter().all(|&value| {
                    let slot = fnv_hash(seed, &self.keys[value]) as usize % n;
                    if claimed[slot] || slots.contains(&slot) {
                        false
                    } else {
                        slots.push(slot);
                        true
                    }
                });
                if fits {
                    break;
                }
                seed += 1;
                if seed > MAX_SEED_ATTEMPTS {
                    return Err(HashError::SeedSearchExhausted {
                        bucket_size: bucket.len(),
                        attempts: MAX_SEED_ATTEMPTS,
                    });
                }
            }

            g[b] = Displacement::Seed(seed).to_wire();
            for (&value, &slot) in bucket.iter().zip(&slots) {
                claimed[slot] = true;
                values[slot] = value as i32;
            }
            max_seed = max_seed.max(seed);
        }

        // Phase two: every remaining bucket holds exactly one key. Hand out
        // the unclaimed slots in ascending order, still walking the sorted
        // bucket order so output bytes stay deterministic. Phase one claimed
        // exactly one slot per placed key, so the counts always match.
        let free = (0..n).filter(|&slot| !claimed[slot]);
        let singletons = order.iter().copied().filter(|&b| buckets[b].len() == 1);
        for (b, slot) in singletons.zip(free) {
            g[b] = Displacement::DirectSlot(slot as u32).to_wire();
            values[slot] = buckets[b][0] as i32;
        }

        debug!(keys = n, max_seed, "perfect hash construction complete");
        Ok(PerfectHashTable::from_parts(g, values))
    }
}
