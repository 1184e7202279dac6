//! Report module: prints per-workload timings and a map vs. slice comparison.

use crate::workloads::{BatchSample, Container, Workload};

/// Samples collected for one workload.
#[derive(Debug, Clone)]
pub struct WorkloadResult {
    pub workload: Workload,
    pub length: usize,
    /// Mean nanoseconds per operation, one entry per sample.
    pub sample_ns_per_op: Vec<f64>,
    pub total_iterations: usize,
    pub total_allocations: u64,
    pub total_bytes: u64,
}

impl WorkloadResult {
    pub fn new(workload: Workload, length: usize) -> Self {
        Self {
            workload,
            length,
            sample_ns_per_op: Vec::new(),
            total_iterations: 0,
            total_allocations: 0,
            total_bytes: 0,
        }
    }

    pub fn add_sample(&mut self, sample: &BatchSample) {
        if sample.iterations == 0 {
            return;
        }
        let ns = sample.elapsed.as_secs_f64() * 1e9;
        self.sample_ns_per_op.push(ns / sample.iterations as f64);
        self.total_iterations += sample.iterations;
        self.total_allocations += sample.allocs.allocations;
        self.total_bytes += sample.allocs.bytes;
    }

    pub fn mean_ns(&self) -> f64 {
        if self.sample_ns_per_op.is_empty() {
            return 0.0;
        }
        self.sample_ns_per_op.iter().sum::<f64>() / self.sample_ns_per_op.len() as f64
    }

    /// Nearest-rank percentile of the per-sample means: the smallest sample
    /// with at least `pct` percent of samples at or below it.
    pub fn percentile_ns(&self, pct: f64) -> f64 {
        if self.sample_ns_per_op.is_empty() {
            return 0.0;
        }
        let mut sorted = self.sample_ns_per_op.clone();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();
        let rank = (pct.clamp(0.0, 100.0) * n as f64 / 100.0).ceil() as usize;
        sorted[rank.clamp(1, n) - 1]
    }

    pub fn allocs_per_op(&self) -> f64 {
        per_op(self.total_allocations, self.total_iterations)
    }

    pub fn bytes_per_op(&self) -> f64 {
        per_op(self.total_bytes, self.total_iterations)
    }
}

fn per_op(total: u64, iterations: usize) -> f64 {
    if iterations == 0 {
        return 0.0;
    }
    total as f64 / iterations as f64
}

/// Map-side and slice-side results of the same operation.
pub fn comparison_pairs(results: &[WorkloadResult]) -> Vec<(&WorkloadResult, &WorkloadResult)> {
    results
        .iter()
        .filter(|r| r.workload.container() == Container::Map)
        .filter_map(|map| {
            let other = map.workload.counterpart();
            results
                .iter()
                .find(|r| r.workload == other)
                .map(|slice| (map, slice))
        })
        .collect()
}

/// Print a formatted report of every workload result.
pub fn print_report(results: &[WorkloadResult]) {
    println!("\n{}", "=".repeat(96));
    println!("  Map vs. Slice Container Benchmark Report");
    if let Some(first) = results.first() {
        println!("  Container length: {}", first.length);
    }
    println!("{}", "=".repeat(96));

    println!(
        "\n  {:10} {:30} {:>12} {:>12} {:>12} {:>10} {:>10}",
        "Group", "Benchmark", "Mean (ns/op)", "p50", "p95", "allocs/op", "B/op"
    );
    println!("  {}", "-".repeat(94));
    for r in results {
        println!(
            "  {:10} {:30} {:>12.1} {:>12.1} {:>12.1} {:>10.1} {:>10.0}",
            r.workload.group().name(),
            r.workload.name(),
            r.mean_ns(),
            r.percentile_ns(50.0),
            r.percentile_ns(95.0),
            r.allocs_per_op(),
            r.bytes_per_op(),
        );
    }

    let pairs = comparison_pairs(results);
    if !pairs.is_empty() {
        println!("\n  Comparison Summary (map / slice):");
        println!(
            "  {:30} {:>12} {:>12} {:>8}  {}",
            "Map benchmark", "Map (ns)", "Slice (ns)", "Ratio", "Faster"
        );
        println!("  {}", "-".repeat(76));
        for (map, slice) in pairs {
            let (m, s) = (map.mean_ns(), slice.mean_ns());
            let ratio = if s > 0.0 { m / s } else { 0.0 };
            let faster = if m <= s { "map" } else { "slice" };
            println!(
                "  {:30} {:>12.1} {:>12.1} {:>7.2}x  {}",
                map.workload.name(),
                m,
                s,
                ratio,
                faster
            );
        }
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc_counter::AllocSnapshot;
    use std::time::Duration;

    fn sample(iterations: usize, nanos: u64, allocations: u64, bytes: u64) -> BatchSample {
        BatchSample {
            iterations,
            elapsed: Duration::from_nanos(nanos),
            allocs: AllocSnapshot {
                allocations,
                bytes,
                deallocations: 0,
            },
        }
    }

    #[test]
    fn empty_result_reports_zeros() {
        let r = WorkloadResult::new(Workload::MapIterations, 100);
        assert_eq!(r.mean_ns(), 0.0);
        assert_eq!(r.percentile_ns(95.0), 0.0);
        assert_eq!(r.allocs_per_op(), 0.0);
        assert_eq!(r.bytes_per_op(), 0.0);
    }

    #[test]
    fn per_op_figures_divide_by_iterations() {
        let mut r = WorkloadResult::new(Workload::CreateSliceConstruction, 100);
        r.add_sample(&sample(10, 1_000, 40, 4_000));
        r.add_sample(&sample(10, 3_000, 40, 4_000));

        assert_eq!(r.total_iterations, 20);
        assert!((r.mean_ns() - 200.0).abs() < 1e-9);
        assert!((r.allocs_per_op() - 4.0).abs() < 1e-9);
        assert!((r.bytes_per_op() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn percentiles_pick_from_sorted_samples() {
        let mut r = WorkloadResult::new(Workload::SliceIterations, 100);
        for ns in [50, 10, 40, 20, 30] {
            r.add_sample(&sample(1, ns, 0, 0));
        }
        assert!((r.percentile_ns(0.0) - 10.0).abs() < 1e-9);
        assert!((r.percentile_ns(50.0) - 30.0).abs() < 1e-9);
        assert!((r.percentile_ns(100.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn percentiles_use_nearest_rank() {
        let mut r = WorkloadResult::new(Workload::SliceIterations, 100);
        for ns in [50, 10, 40, 20, 30] {
            r.add_sample(&sample(1, ns, 0, 0));
        }
        // Rank ceil(p * n / 100): 20% of 5 is exactly the first sample.
        assert!((r.percentile_ns(20.0) - 10.0).abs() < 1e-9);
        assert!((r.percentile_ns(40.0) - 20.0).abs() < 1e-9);
        assert!((r.percentile_ns(41.0) - 30.0).abs() < 1e-9);
        assert!((r.percentile_ns(95.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn single_sample_is_every_percentile() {
        let mut r = WorkloadResult::new(Workload::SliceIterations, 100);
        r.add_sample(&sample(1, 70, 0, 0));
        for pct in [0.0, 50.0, 99.0, 100.0] {
            assert!((r.percentile_ns(pct) - 70.0).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_iteration_samples_are_skipped() {
        let mut r = WorkloadResult::new(Workload::MapIterations, 100);
        r.add_sample(&sample(0, 1_000, 5, 5));
        assert!(r.sample_ns_per_op.is_empty());
        assert_eq!(r.total_allocations, 0);
    }

    #[test]
    fn pairs_match_map_to_slice() {
        let results: Vec<WorkloadResult> = Workload::ALL
            .iter()
            .map(|&w| WorkloadResult::new(w, 100))
            .collect();
        let pairs = comparison_pairs(&results);
        assert_eq!(pairs.len(), Workload::ALL.len() / 2);
        for (map, slice) in pairs {
            assert_eq!(map.workload.container(), Container::Map);
            assert_eq!(slice.workload, map.workload.counterpart());
        }
    }

    #[test]
    fn unpaired_results_are_left_out() {
        let results = vec![WorkloadResult::new(Workload::MapIterations, 100)];
        assert!(comparison_pairs(&results).is_empty());
    }
}
