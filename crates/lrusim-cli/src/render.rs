//! Text and JSON rendering of engine output

use std::io::{self, Write};

use lrusim::{AccessEvent, CacheEngine, Statistics};
use serde::Serialize;

/// Format an address as `0x` followed by at least four hex digits
pub fn hex(address: i64) -> String {
    if address < 0 {
        format!("-0x{:04x}", address.unsigned_abs())
    } else {
        format!("0x{:04x}", address)
    }
}

/// Program banner
pub fn banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "╔════════════════════════════════════════╗")?;
    writeln!(out, "║   LRU CACHE SIMULATOR                  ║")?;
    writeln!(out, "║   Data Structures & Computer Arch      ║")?;
    writeln!(out, "╚════════════════════════════════════════╝")
}

/// Announce a freshly constructed engine
pub fn initialized<W: Write>(out: &mut W, engine: &CacheEngine) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== LRU Cache Simulator Initialized ===")?;
    writeln!(out, "Cache Capacity: {} blocks", engine.capacity())?;
    writeln!(out, "Replacement Policy: Least Recently Used (LRU)")?;
    writeln!(out)
}

/// One trace line for an access
pub fn event<W: Write>(out: &mut W, event: &AccessEvent) -> io::Result<()> {
    match event {
        AccessEvent::Hit { address, value } => {
            writeln!(out, "HIT  | Address: {} | Data: {}", hex(*address), value)
        }
        AccessEvent::Miss {
            address,
            evicted,
            value,
        } => {
            write!(out, "MISS | Address: {}", hex(*address))?;
            if let Some(block) = evicted {
                write!(out, " | Evicting: {}", hex(block.address))?;
            }
            writeln!(out, " | Loaded: {}", value)
        }
    }
}

/// Resident blocks from MRU to LRU
pub fn cache_state<W: Write>(out: &mut W, engine: &CacheEngine) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- Current Cache State ---")?;
    writeln!(out, "Order: [Most Recent] -> [Least Recent]")?;

    let snapshot = engine.snapshot();
    if snapshot.is_empty() {
        return writeln!(out, "Cache is empty.");
    }

    for block in &snapshot {
        writeln!(
            out,
            "Block {}: Addr={}, Data={}",
            block.position,
            hex(block.address),
            block.value
        )?;
    }
    writeln!(out)
}

/// Counters, rates and utilization
pub fn statistics<W: Write>(out: &mut W, stats: &Statistics) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "========== Performance Statistics ==========")?;
    writeln!(out, "Total Accesses:  {}", stats.total_accesses)?;
    writeln!(out, "Cache Hits:      {}", stats.hits)?;
    writeln!(out, "Cache Misses:    {}", stats.misses)?;
    writeln!(out, "Evictions:       {}", stats.evictions)?;

    if let (Some(hit_rate), Some(miss_rate)) = (stats.hit_rate(), stats.miss_rate()) {
        writeln!(out, "Hit Rate:        {:.2}%", hit_rate * 100.0)?;
        writeln!(out, "Miss Rate:       {:.2}%", miss_rate * 100.0)?;
    }

    writeln!(
        out,
        "Cache Utilization: {}/{} blocks",
        stats.resident, stats.capacity
    )?;
    writeln!(out, "==========================================")?;
    writeln!(out)
}

/// Statistics as emitted by `replay --json`
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub total_accesses: u64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub resident: usize,
    pub capacity: usize,
    pub hit_rate: Option<f64>,
    pub miss_rate: Option<f64>,
    pub utilization: f64,
}

impl From<&Statistics> for StatsReport {
    fn from(stats: &Statistics) -> Self {
        Self {
            total_accesses: stats.total_accesses,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            resident: stats.resident,
            capacity: stats.capacity,
            hit_rate: stats.hit_rate(),
            miss_rate: stats.miss_rate(),
            utilization: stats.utilization(),
        }
    }
}

/// Statistics as a pretty-printed JSON object
pub fn statistics_json<W: Write>(out: &mut W, stats: &Statistics) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &StatsReport::from(stats))?;
    writeln!(out)?;
    Ok(())
}
