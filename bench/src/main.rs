//! Standalone benchmark runner that prints the formatted report.
//!
//! Unlike the criterion harness this also reports allocations per operation,
//! counted by the global allocator installed below.
//!
//! Usage:
//!   cargo run --release
//!   BENCH_LENGTH=1000 BENCH_SAMPLES=20 cargo run --release
//!   cargo run --release -- map_iterations slice_iterations   # subset

use anyhow::{Context, Result};
use container_bench::alloc_counter::CountingAllocator;
use container_bench::config::{self, RunnerConfig};
use container_bench::report::{print_report, WorkloadResult};
use container_bench::workloads::Workload;
use std::{env, process};

#[global_allocator]
static ALLOC: CountingAllocator = CountingAllocator;

fn bench_workload(workload: Workload, cfg: &RunnerConfig) -> Result<WorkloadResult> {
    // Warmup
    workload
        .run_batch(cfg.length, cfg.warmup)
        .with_context(|| format!("warmup of {} failed", workload.name()))?;

    // Collect samples
    let mut result = WorkloadResult::new(workload, cfg.length);
    for _ in 0..cfg.samples {
        let sample = workload
            .run_batch(cfg.length, cfg.batch)
            .with_context(|| format!("sample of {} failed", workload.name()))?;
        result.add_sample(&sample);
    }

    Ok(result)
}

/// Workloads named on the command line, or all of them.
fn selected_workloads(args: &[String]) -> Result<Vec<Workload>> {
    if args.is_empty() {
        return Ok(Workload::ALL.to_vec());
    }
    args.iter()
        .map(|name| {
            Workload::from_name(name).with_context(|| format!("unknown benchmark `{name}`"))
        })
        .collect()
}

fn run() -> Result<()> {
    let dotenv_path = config::load_dotenv();
    let cfg = RunnerConfig::from_env()?;
    bench_core::initialize_logger(cfg.log_level, cfg.log_file.as_deref())?;
    if let Some(path) = dotenv_path {
        log::info!("Loaded environment from {}", path.display());
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let workloads = selected_workloads(&args)?;

    println!("Running map vs. slice container benchmark...");
    println!("  Container length: {}", cfg.length);
    println!("  Warmup iters:     {}", cfg.warmup);
    println!("  Samples:          {} x {} iters", cfg.samples, cfg.batch);

    let mut results = Vec::with_capacity(workloads.len());
    for workload in workloads {
        log::info!("Benchmarking {}/{}", workload.group().name(), workload.name());
        let r = bench_workload(workload, &cfg)?;
        log::info!(
            "{} done ({:.1} ns/op, {:.1} allocs/op)",
            workload.name(),
            r.mean_ns(),
            r.allocs_per_op()
        );
        results.push(r);
    }

    print_report(&results);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        log::error!("Benchmark run failed: {e:#}");
        eprintln!("Benchmark run failed: {e:#}");
        process::exit(1);
    }
}
