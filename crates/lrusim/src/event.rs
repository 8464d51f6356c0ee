//! Blocks and the structured outcome of a single access

/// A resident cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    /// Memory address keying the block
    pub address: i64,
    /// Payload loaded for the address
    pub value: i64,
}

impl Block {
    /// Create a block
    pub fn new(address: i64, value: i64) -> Self {
        Self { address, value }
    }
}

/// A block together with its position in the recency order (0 = MRU)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidentBlock {
    /// Rank from most- to least-recently used
    pub position: usize,
    /// Memory address
    pub address: i64,
    /// Payload
    pub value: i64,
}

/// What happened on a call to [`CacheEngine::access`](crate::CacheEngine::access)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessEvent {
    /// Address was resident; block promoted to MRU
    Hit {
        /// Accessed address
        address: i64,
        /// Value already held by the block
        value: i64,
    },
    /// Address was absent; block loaded at MRU, possibly evicting the LRU block
    Miss {
        /// Accessed address
        address: i64,
        /// Block evicted to make room, if the cache was full
        evicted: Option<Block>,
        /// Value loaded for the address
        value: i64,
    },
}

impl AccessEvent {
    /// Accessed address
    pub fn address(&self) -> i64 {
        match *self {
            AccessEvent::Hit { address, .. } | AccessEvent::Miss { address, .. } => address,
        }
    }

    /// Value returned by the access
    pub fn value(&self) -> i64 {
        match *self {
            AccessEvent::Hit { value, .. } | AccessEvent::Miss { value, .. } => value,
        }
    }

    /// Whether the access was a hit
    pub fn is_hit(&self) -> bool {
        matches!(self, AccessEvent::Hit { .. })
    }

    /// Block evicted by this access
    pub fn evicted(&self) -> Option<Block> {
        match *self {
            AccessEvent::Hit { .. } => None,
            AccessEvent::Miss { evicted, .. } => evicted,
        }
    }
}
