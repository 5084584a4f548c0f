use ahash::RandomState;

use crate::config::TableConfig;
use crate::error::{BrcError, Result};
use crate::measurement::Measurement;

// Fixed seeds keep probe sequences identical across tables and runs.
const SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

struct Slot {
    hash: u64,
    key: Box<[u8]>,
    measurement: Measurement,
}

/// Fixed-capacity open-addressing map from key bytes to a [`Measurement`].
///
/// Slots only ever go from empty to occupied. Inserting more than
/// `max_keys` distinct keys fails with [`BrcError::CapacityExceeded`].
pub struct AggregateTable {
    slots: Box<[Option<Slot>]>,
    mask: usize,
    len: usize,
    max_keys: usize,
    hasher: RandomState,
}

impl AggregateTable {
    pub fn new(config: &TableConfig) -> Self {
        let slots = (0..config.capacity()).map(| _ | None).collect();
        Self {
            slots,
            mask: config.capacity() - 1,
            len: 0,
            max_keys: config.max_keys(),
            hasher: RandomState::with_seeds(SEEDS[0], SEEDS[1], SEEDS[2], SEEDS[3]),
        }
    }

    /// Returns the measurement for `key`, creating an empty one on first sight.
    #[inline]
    pub fn find_or_create(&mut self, key: &[u8]) -> Result<&mut Measurement> {
        let hash = self.hasher.hash_one(key);
        let index = self.probe(key, hash);

        match &mut self.slots[index] {
            Some(slot) => Ok(&mut slot.measurement),
            vacant => {
                if self.len == self.max_keys {
                    return Err(BrcError::CapacityExceeded { max_keys: self.max_keys });
                }
                self.len += 1;
                let slot = vacant.insert(Slot {
                    hash,
                    key: key.into(),
                    measurement: Measurement::default(),
                });
                Ok(&mut slot.measurement)
            }
        }
    }

    /// First slot on the probe path that is empty or holds `key`.
    #[inline]
    fn probe(&self, key: &[u8], hash: u64) -> usize {
        let mut index = hash as usize & self.mask;
        while let Some(slot) = &self.slots[index] {
            if slot.hash == hash && *slot.key == *key {
                break;
            }
            index = (index + 1) & self.mask;
        }
        index
    }

    pub fn get(&self, key: &[u8]) -> Option<&Measurement> {
        let hash = self.hasher.hash_one(key);
        self.slots[self.probe(key, hash)]
            .as_ref()
            .map(| slot | &slot.measurement)
    }

    /// Occupied entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &Measurement)> {
        self.slots
            .iter()
            .flatten()
            .map(| slot | (&*slot.key, &slot.measurement))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
