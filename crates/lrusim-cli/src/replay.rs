//! Trace-driven simulation

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use lrusim::CacheEngine;
use tracing::debug;

use crate::parser::{parse_trace, TraceAccess};
use crate::render;

/// Replay a trace file against a fresh engine
///
/// # Arguments
/// * `path` - Trace file, one `<address> [data]` per line
/// * `capacity` - Cache capacity
/// * `json` - Print statistics as JSON instead of the text report
pub fn run_file<W: Write>(
    out: &mut W,
    path: &Path,
    capacity: usize,
    json: bool,
) -> Result<CacheEngine> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read trace {}", path.display()))?;
    let accesses =
        parse_trace(&text).with_context(|| format!("invalid trace {}", path.display()))?;

    debug!(count = accesses.len(), path = %path.display(), "replaying trace");
    run(out, &accesses, capacity, json)
}

/// Replay parsed accesses against a fresh engine
pub fn run<W: Write>(
    out: &mut W,
    accesses: &[TraceAccess],
    capacity: usize,
    json: bool,
) -> Result<CacheEngine> {
    let mut engine = CacheEngine::new(capacity)?;

    for access in accesses {
        let event = engine.access(access.address, access.data);
        if !json {
            render::event(out, &event)?;
        }
    }

    if json {
        render::statistics_json(out, &engine.statistics())?;
    } else {
        render::cache_state(out, &engine)?;
        render::statistics(out, &engine.statistics())?;
    }

    Ok(engine)
}
