//! Local, in-process timing of every strategy. No HTTP involved.

use anyhow::{bail, Context, Result};

use fibsvc_core::{ComputeService, Size, Strategy};

use crate::config::CacheConfig;

/// The naive recursion is skipped above this size to keep the command
/// interactive.
pub const RECURSIVE_LIMIT: u32 = 35;

#[derive(Debug)]
pub struct BenchRow {
    pub strategy: Strategy,
    pub size: u32,
    pub runs: usize,
    /// First call, i.e. cold cache for the memoizing strategies.
    pub first_ms: f64,
    pub mean_ms: f64,
    pub result: u64,
}

/// Parse a comma-separated size list. Unlike request parsing this is strict.
pub fn parse_sizes(raw: &str) -> Result<Vec<Size>> {
    let mut sizes = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let n: u32 = part
            .parse()
            .with_context(|| format!("invalid size '{part}'"))?;
        match Size::new(n) {
            Some(size) => sizes.push(size),
            None => bail!("size {n} out of range"),
        }
    }
    if sizes.is_empty() {
        bail!("no sizes given");
    }
    Ok(sizes)
}

pub fn run(cache_cfg: &CacheConfig, sizes: &[Size], runs: usize) -> Result<Vec<BenchRow>> {
    let runs = runs.max(1);
    let mut rows = Vec::new();

    for strategy in Strategy::ALL {
        for &size in sizes {
            if strategy == Strategy::Recursive && size.get() > RECURSIVE_LIMIT {
                continue;
            }
            // Fresh service per row so every strategy starts cold.
            let svc = ComputeService::new(strategy, cache_cfg.build(strategy)?)?;
            let first = svc.compute_size(size);
            let mut total_ms = first.latency_ms;
            for _ in 1..runs {
                total_ms += svc.compute_size(size).latency_ms;
            }
            rows.push(BenchRow {
                strategy,
                size: size.get(),
                runs,
                first_ms: first.latency_ms,
                mean_ms: total_ms / runs as f64,
                result: first.result,
            });
        }
    }

    Ok(rows)
}

pub fn print(rows: &[BenchRow]) {
    println!("fibsvc strategy benchmark");
    println!("{}", "─".repeat(66));
    println!(
        "{:<10} {:>5} {:>6} {:>12} {:>12} {:>14}",
        "strategy", "size", "runs", "first", "mean", "result"
    );
    for row in rows {
        println!(
            "{:<10} {:>5} {:>6} {:>12} {:>12} {:>14}",
            row.strategy.to_string(),
            row.size,
            row.runs,
            format_duration(row.first_ms),
            format_duration(row.mean_ms),
            row.result
        );
    }
    println!("{}", "─".repeat(66));
    println!(
        "Platform: {}-{}",
        std::env::consts::ARCH,
        std::env::consts::OS
    );
}

fn format_duration(ms: f64) -> String {
    if ms < 0.001 {
        format!("{:.1} ns", ms * 1_000_000.0)
    } else if ms < 1.0 {
        format!("{:.1} µs", ms * 1000.0)
    } else if ms < 1000.0 {
        format!("{:.1} ms", ms)
    } else {
        format!("{:.2} s", ms / 1000.0)
    }
}
