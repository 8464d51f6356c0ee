//! Access counters and derived statistics

/// Running counters owned by the engine
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Counters {
    pub(crate) total_accesses: u64,
    pub(crate) hits: u64,
    pub(crate) misses: u64,
    pub(crate) evictions: u64,
}

impl Counters {
    pub(crate) fn record_hit(&mut self) {
        self.total_accesses += 1;
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.total_accesses += 1;
        self.misses += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Point-in-time view of cache performance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Accesses since construction or last reset
    pub total_accesses: u64,
    /// Accesses that found the address resident
    pub hits: u64,
    /// Accesses that had to load the address
    pub misses: u64,
    /// Blocks removed to make room for a miss
    pub evictions: u64,
    /// Blocks currently resident
    pub resident: usize,
    /// Maximum number of resident blocks
    pub capacity: usize,
}

impl Statistics {
    pub(crate) fn new(counters: Counters, resident: usize, capacity: usize) -> Self {
        Self {
            total_accesses: counters.total_accesses,
            hits: counters.hits,
            misses: counters.misses,
            evictions: counters.evictions,
            resident,
            capacity,
        }
    }

    /// Fraction of accesses that hit (0.0 to 1.0), `None` before any access
    pub fn hit_rate(&self) -> Option<f64> {
        if self.total_accesses == 0 {
            None
        } else {
            Some(self.hits as f64 / self.total_accesses as f64)
        }
    }

    /// Fraction of accesses that missed, `None` before any access
    pub fn miss_rate(&self) -> Option<f64> {
        self.hit_rate().map(|rate| 1.0 - rate)
    }

    /// Resident blocks over capacity (0.0 to 1.0)
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.resident as f64 / self.capacity as f64
        }
    }
}
