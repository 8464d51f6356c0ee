//! Scripted demonstration of hits, misses and LRU eviction

use std::io::Write;

use anyhow::Result;
use lrusim::CacheEngine;

use crate::render;

/// A titled group of accesses followed by a cache state dump
struct Phase {
    title: &'static str,
    accesses: &'static [(i64, Option<i64>)],
}

const PHASES: &[Phase] = &[
    Phase {
        title: "Test 1: Sequential Access Pattern",
        accesses: &[
            (0x1000, Some(100)),
            (0x2000, Some(200)),
            (0x3000, Some(300)),
            (0x4000, Some(400)),
        ],
    },
    Phase {
        title: "Test 2: Re-accessing Address 0x2000",
        accesses: &[(0x2000, None)],
    },
    Phase {
        title: "Test 3: Cache Overflow - Eviction Test",
        accesses: &[(0x5000, Some(500))],
    },
    Phase {
        title: "Test 4: Mixed Access Pattern",
        accesses: &[
            (0x3000, None),
            (0x6000, Some(600)),
            (0x2000, None),
            (0x7000, Some(700)),
        ],
    },
];

/// Run the demonstration against a fresh engine and print the final statistics
pub fn run<W: Write>(out: &mut W, capacity: usize) -> Result<CacheEngine> {
    writeln!(out)?;
    writeln!(out, "***** LRU Cache Simulator Demo *****")?;

    let mut engine = CacheEngine::new(capacity)?;
    render::initialized(out, &engine)?;

    for phase in PHASES {
        writeln!(out)?;
        writeln!(out, "{}", phase.title)?;
        writeln!(out, "{}", "-".repeat(phase.title.len()))?;

        for &(address, data) in phase.accesses {
            let event = engine.access(address, data);
            render::event(out, &event)?;
        }
        render::cache_state(out, &engine)?;
    }

    render::statistics(out, &engine.statistics())?;
    Ok(engine)
}
