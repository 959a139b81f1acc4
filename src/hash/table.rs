//! Minimal perfect hash table representation and lookup

use super::fnv::fnv_hash;

/// One entry of the displacement table `G`
///
/// Buckets with two or more keys record the seed that re-hashes their members
/// into free slots; singleton buckets record the slot directly. On the wire
/// both collapse into one signed 32-bit integer, with the sign as the tag:
/// seeds start at 1, so the direct-slot form `-(slot) - 1` never overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Displacement {
    /// Seed for re-hashing the bucket's keys
    Seed(u32),
    /// Direct value-table slot for a singleton bucket
    DirectSlot(u32),
}

impl Displacement {
    /// Collapse to the signed wire form
    pub fn to_wire(self) -> i32 {
        match self {
            Self::Seed(d) => d as i32,
            Self::DirectSlot(slot) => -(slot as i32) - 1,
        }
    }

    /// Decode from the signed wire form
    pub fn from_wire(raw: i32) -> Self {
        if raw < 0 {
            Self::DirectSlot((-raw - 1) as u32)
        } else {
            Self::Seed(raw as u32)
        }
    }
}

/// Immutable minimal perfect hash table
///
/// Holds the displacement table `G` and value table `V` produced by
/// [`PerfectHashBuilder`](super::PerfectHashBuilder), both already in wire
/// form. For every key the table was built over, [`lookup`](Self::lookup)
/// returns that key's assigned value; for any other key it returns *some*
/// value in range. The table is not a membership test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerfectHashTable {
    g: Vec<i32>,
    values: Vec<i32>,
}

impl PerfectHashTable {
    /// Assemble a table from its wire-form parts
    ///
    /// Both slices must have the same length; the builder upholds this, and
    /// the archive reader validates it before calling.
    pub(crate) fn from_parts(g: Vec<i32>, values: Vec<i32>) -> Self {
        debug_assert_eq!(g.len(), values.len());
        Self { g, values }
    }

    /// Number of keys the table was built over
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table holds no keys (never true for a built table)
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Look up the value assigned to `key`
    ///
    /// Never fails and performs no existence check. Callers that need
    /// membership testing must verify the returned value against data stored
    /// alongside it.
    pub fn lookup(&self, key: &[u8]) -> u32 {
        let n = self.g.len();
        let d = self.g[fnv_hash(0, key) as usize % n];
        let slot = match Displacement::from_wire(d) {
            Displacement::DirectSlot(slot) => slot as usize,
            Displacement::Seed(seed) => fnv_hash(seed, key) as usize % n,
        };
        self.values[slot] as u32
    }

    /// Wire-form displacement table `G`
    pub fn displacements(&self) -> &[i32] {
        &self.g
    }

    /// Wire-form value table `V`
    pub fn values(&self) -> &[i32] {
        &self.values
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_displacement_wire_seed() {
        let d = Displacement::Seed(42);
        assert_eq!(d.to_wire(), 42);
        assert_eq!(Displacement::from_wire(42), d);
    }

    #[test]
    fn test_displacement_wire_direct_slot() {
        let d = Displacement::DirectSlot(0);
        assert_eq!(d.to_wire(), -1);
        assert_eq!(Displacement::from_wire(-1), d);

        let d = Displacement::DirectSlot(17);
        assert_eq!(d.to_wire(), -18);
        assert_eq!(Displacement::from_wire(-18), d);
    }

    #[test]
    fn test_displacement_encodings_disjoint() {
        // Seeds start at 1, so every wire value decodes unambiguously.
        for slot in 0..100u32 {
            assert!(Displacement::DirectSlot(slot).to_wire() < 0);
        }
        for seed in 1..100u32 {
            assert!(Displacement::Seed(seed).to_wire() > 0);
        }
    }

    #[test]
    fn test_lookup_direct_slot() {
        // Single-key table: G holds one direct-slot entry.
        let table = PerfectHashTable::from_parts(vec![-1], vec![0]);
        assert_eq!(table.lookup(b"only.txt"), 0);
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
    }
}
