//! Property tests for the LRU engine invariants: capacity bound, address
//! uniqueness, MRU placement, eviction choice, counter consistency, stable
//! hit values and reset behaviour.

use std::collections::HashSet;

use lrusim::{AccessEvent, CacheEngine};
use proptest::prelude::*;

/// Small address space so that hits and evictions both occur often
fn accesses() -> impl Strategy<Value = Vec<(i64, Option<i64>)>> {
    prop::collection::vec((0i64..16, prop::option::of(any::<i64>())), 0..200)
}

proptest! {
    #[test]
    fn prop_resident_count_within_capacity(
        capacity in 1usize..8,
        ops in accesses(),
    ) {
        let mut engine = CacheEngine::new(capacity).unwrap();

        for (address, data) in ops {
            engine.access(address, data);
            prop_assert!(engine.len() <= capacity);
            prop_assert_eq!(engine.snapshot().len(), engine.len());
        }
    }

    #[test]
    fn prop_addresses_unique(
        capacity in 1usize..8,
        ops in accesses(),
    ) {
        let mut engine = CacheEngine::new(capacity).unwrap();

        for (address, data) in ops {
            engine.access(address, data);
            let seen: HashSet<i64> = engine.iter().map(|b| b.address).collect();
            prop_assert_eq!(seen.len(), engine.len());
        }
    }

    #[test]
    fn prop_accessed_address_is_mru(
        capacity in 1usize..8,
        ops in accesses(),
    ) {
        let mut engine = CacheEngine::new(capacity).unwrap();

        for (address, data) in ops {
            let event = engine.access(address, data);
            let snapshot = engine.snapshot();
            prop_assert_eq!(snapshot[0].position, 0);
            prop_assert_eq!(snapshot[0].address, address);
            prop_assert_eq!(snapshot[0].value, event.value());
            prop_assert!(engine.contains(address));
        }
    }

    #[test]
    fn prop_eviction_takes_last_position(
        capacity in 1usize..8,
        ops in accesses(),
    ) {
        let mut engine = CacheEngine::new(capacity).unwrap();

        for (address, data) in ops {
            let before = engine.snapshot();
            let was_full = before.len() == capacity;
            let was_resident = before.iter().any(|b| b.address == address);

            match engine.access(address, data) {
                AccessEvent::Hit { .. } => prop_assert!(was_resident),
                AccessEvent::Miss { evicted, .. } => {
                    prop_assert!(!was_resident);
                    if was_full {
                        let last = before.last().unwrap();
                        let evicted = evicted.unwrap();
                        prop_assert_eq!(evicted.address, last.address);
                        prop_assert_eq!(evicted.value, last.value);
                        prop_assert!(!engine.contains(last.address));
                    } else {
                        prop_assert!(evicted.is_none());
                    }
                }
            }
        }
    }

    #[test]
    fn prop_counters_consistent(
        capacity in 1usize..8,
        ops in accesses(),
    ) {
        let mut engine = CacheEngine::new(capacity).unwrap();
        let mut hits = 0u64;

        for (address, data) in &ops {
            if engine.access(*address, *data).is_hit() {
                hits += 1;
            }
            let stats = engine.statistics();
            prop_assert_eq!(stats.total_accesses, stats.hits + stats.misses);
        }

        let stats = engine.statistics();
        prop_assert_eq!(stats.total_accesses, ops.len() as u64);
        prop_assert_eq!(stats.hits, hits);
        prop_assert!(stats.evictions <= stats.misses);
    }

    #[test]
    fn prop_repeated_hits_keep_value(
        capacity in 1usize..8,
        address in any::<i64>(),
        data in prop::option::of(any::<i64>()),
        later in prop::collection::vec(prop::option::of(any::<i64>()), 1..10),
    ) {
        let mut engine = CacheEngine::new(capacity).unwrap();
        let first = engine.access(address, data).value();

        for data in later {
            let event = engine.access(address, data);
            prop_assert!(event.is_hit());
            prop_assert_eq!(event.value(), first);
        }
    }

    #[test]
    fn prop_reset_behaves_like_fresh_engine(
        capacity in 1usize..8,
        warmup in accesses(),
        ops in accesses(),
    ) {
        let mut engine = CacheEngine::new(capacity).unwrap();
        for (address, data) in warmup {
            engine.access(address, data);
        }

        engine.reset();
        prop_assert!(engine.snapshot().is_empty());
        let stats = engine.statistics();
        prop_assert_eq!(stats.total_accesses, 0);
        prop_assert_eq!(stats.hits, 0);
        prop_assert_eq!(stats.misses, 0);
        prop_assert_eq!(engine.capacity(), capacity);

        let mut fresh = CacheEngine::new(capacity).unwrap();
        for (address, data) in ops {
            prop_assert_eq!(engine.access(address, data), fresh.access(address, data));
        }
        prop_assert_eq!(engine.snapshot(), fresh.snapshot());
        prop_assert_eq!(engine.statistics(), fresh.statistics());
    }
}
