//! CacheEngine: fully-associative LRU cache with access accounting

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::event::{AccessEvent, Block, ResidentBlock};
use crate::lru::{Iter, RecencyList};
use crate::stats::{Counters, Statistics};

/// Multiplier used to synthesise a value when an access supplies no data
pub const AUTO_VALUE_FACTOR: i64 = 10;

/// Fixed-capacity LRU cache engine
///
/// Every [`access`](Self::access) is classified as a hit or a miss and
/// reported as an [`AccessEvent`]. The engine does no I/O; rendering the
/// events is left to the caller.
#[derive(Debug)]
pub struct CacheEngine {
    /// Resident blocks in recency order
    blocks: RecencyList,

    /// Hit/miss/eviction counters
    counters: Counters,

    /// Maximum number of resident blocks
    capacity: usize,
}

impl CacheEngine {
    /// Create an empty engine holding at most `capacity` blocks
    ///
    /// # Errors
    /// * `Error::InvalidConfiguration` if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidConfiguration(
                "capacity must be greater than 0".to_string(),
            ));
        }

        debug!(capacity, "cache engine created");

        Ok(Self {
            blocks: RecencyList::with_capacity(capacity),
            counters: Counters::default(),
            capacity,
        })
    }

    /// Access `address`, loading it on a miss
    ///
    /// # Arguments
    /// * `address` - Memory address to access
    /// * `data` - Value to load on a miss; `None` derives it from the address.
    ///   Ignored on a hit.
    ///
    /// # Returns
    /// * `AccessEvent` - Hit or miss, carrying the value and any evicted block
    pub fn access(&mut self, address: i64, data: Option<i64>) -> AccessEvent {
        if let Some(value) = self.blocks.touch(address) {
            self.counters.record_hit();
            trace!(address, value, "hit");
            return AccessEvent::Hit { address, value };
        }

        self.counters.record_miss();

        // Evict before inserting so the resident count never exceeds capacity
        let evicted = if self.blocks.len() >= self.capacity {
            let evicted = self.blocks.pop_back();
            if let Some(block) = evicted {
                self.counters.record_eviction();
                trace!(address = block.address, "evict");
            }
            evicted
        } else {
            None
        };

        let value = data.unwrap_or_else(|| auto_value(address));
        self.blocks.push_front(Block::new(address, value));

        trace!(address, value, "miss");
        AccessEvent::Miss {
            address,
            evicted,
            value,
        }
    }

    /// Access `address` with a derived value, returning the value
    pub fn load(&mut self, address: i64) -> i64 {
        self.access(address, None).value()
    }

    /// Resident blocks from MRU to LRU
    pub fn snapshot(&self) -> Vec<ResidentBlock> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(position, block)| ResidentBlock {
                position,
                address: block.address,
                value: block.value,
            })
            .collect()
    }

    /// Iterate resident blocks from MRU to LRU
    pub fn iter(&self) -> Iter<'_> {
        self.blocks.iter()
    }

    /// Value of a resident block without touching recency or counters
    pub fn peek(&self, address: i64) -> Option<i64> {
        let idx = self.blocks.locate(address)?;
        self.blocks.block(idx).map(|block| block.value)
    }

    /// Check whether `address` is resident
    pub fn contains(&self, address: i64) -> bool {
        self.blocks.locate(address).is_some()
    }

    /// The block that the next miss on a full cache would evict
    pub fn lru(&self) -> Option<Block> {
        self.blocks.back().copied()
    }

    /// Current counters and derived rates
    pub fn statistics(&self) -> Statistics {
        Statistics::new(self.counters, self.blocks.len(), self.capacity)
    }

    /// Drop every block and zero all counters; capacity is kept
    pub fn reset(&mut self) {
        self.blocks.clear();
        self.counters.reset();
        debug!(capacity = self.capacity, "cache engine reset");
    }

    /// Number of resident blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if no block is resident
    pub fn is_empty(&self) -> bool {
        self.blocks.len() == 0
    }

    /// Maximum number of resident blocks
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Value synthesised for an address loaded without explicit data
pub fn auto_value(address: i64) -> i64 {
    address.wrapping_mul(AUTO_VALUE_FACTOR)
}
