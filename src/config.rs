use std::num::NonZeroUsize;

use crate::error::{BrcError, Result};

pub const MAX_KEY_LEN: usize = 100;
pub const DEFAULT_MAX_KEYS: usize = 10_000;

/// Sizing of an [`AggregateTable`](crate::table::AggregateTable).
///
/// `capacity` is a power of two strictly larger than `max_keys`, so a probe
/// always reaches an empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    max_keys: usize,
    capacity: usize,
}

impl TableConfig {
    pub fn new(max_keys: usize, capacity: usize) -> Result<Self> {
        if max_keys == 0 {
            return Err(BrcError::InvalidConfig("max keys must be at least 1".into()));
        }
        if !capacity.is_power_of_two() {
            return Err(BrcError::InvalidConfig(
                format!("table capacity {capacity} is not a power of two")
            ));
        }
        if capacity <= max_keys {
            return Err(BrcError::InvalidConfig(
                format!("table capacity {capacity} leaves no headroom over {max_keys} keys")
            ));
        }
        Ok(Self { max_keys, capacity })
    }

    /// Half again as many slots as keys plus one, rounded up to a power of two.
    pub fn with_max_keys(max_keys: usize) -> Result<Self> {
        let capacity = max_keys
            .checked_add(max_keys / 2 + 1)
            .and_then(| slots | slots.checked_next_power_of_two())
            .ok_or_else(|| BrcError::InvalidConfig(format!("{max_keys} keys is too many")))?;
        Self::new(max_keys, capacity)
    }

    pub fn max_keys(&self) -> usize {
        self.max_keys
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { max_keys: DEFAULT_MAX_KEYS, capacity: 16384 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub workers: NonZeroUsize,
    pub table: TableConfig,
}

impl Default for Config {
    fn default() -> Self {
        let workers = std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
        Self { workers, table: TableConfig::default() }
    }
}
