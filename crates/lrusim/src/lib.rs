//! # lrusim
//!
//! Fully-associative LRU cache engine for demonstrating cache behaviour.
//!
//! ## Architecture
//! - **Index**: AHash map from address to arena slot (O(1) lookup)
//! - **Recency list**: Slots linked by prev/next indices, MRU at the head (O(1) promote and evict)
//! - **Accounting**: Hit/miss/eviction counters with derived rates
//!
//! The engine performs no I/O. Each access returns an [`AccessEvent`]
//! describing the hit, miss and any eviction, for the caller to render.

#![warn(missing_docs)]

mod engine;
mod error;
mod event;
mod lru;
mod stats;

pub use engine::{auto_value, CacheEngine, AUTO_VALUE_FACTOR};
pub use error::{Error, Result};
pub use event::{AccessEvent, Block, ResidentBlock};
pub use lru::Iter;
pub use stats::Statistics;
