//! Integration tests: container shapes, copy semantics, allocation counting
//! and the workload catalogue, run with the counting allocator installed.

use bench_core::constants::LENGTH;
use bench_core::containers::{build_mapping, build_sequence};
use bench_core::copy;
use container_bench::alloc_counter::{self, CountingAllocator};
use container_bench::report::WorkloadResult;
use container_bench::workloads::{Group, Workload};

#[global_allocator]
static ALLOC: CountingAllocator = CountingAllocator;

// ── Container shapes ────────────────────────────────────────────────

#[test]
fn builders_produce_exactly_n_canonical_records() {
    for n in [0, 1, 2, 50, LENGTH, 512] {
        let seq = build_sequence(n);
        let map = build_mapping(n);
        assert_eq!(seq.len(), n);
        assert_eq!(map.len(), n);
        assert!(seq.iter().all(|o| o.is_canonical()));
        assert!(map.values().all(|o| o.is_canonical()));
    }
}

#[test]
fn every_inner_is_zeroed_with_empty_bytes() {
    for outer in build_sequence(LENGTH) {
        assert_eq!(outer.c.len(), 1);
        let inner = &outer.c[0];
        assert_eq!(inner.a, 0);
        assert!(inner.b.is_empty());
        assert!(inner.c.is_empty());
    }
}

// ── Copy semantics ──────────────────────────────────────────────────

#[test]
fn append_sequence_of_100_keeps_order() {
    let mut src = build_sequence(100);
    for (i, o) in src.iter_mut().enumerate() {
        o.b = format!("rec_{i:03}");
    }
    let expected: Vec<String> = src.iter().map(|o| o.b.clone()).collect();

    let mut dst = copy::presized_sequence(0);
    copy::append_from_sequence(src, &mut dst);
    assert_eq!(dst.len(), 100);
    let got: Vec<String> = dst.iter().map(|o| o.b.clone()).collect();
    assert_eq!(got, expected);
}

#[test]
fn append_from_mapping_moves_every_value() {
    let mut src = build_mapping(LENGTH);
    for (k, o) in src.iter_mut() {
        o.a = *k as i64;
    }
    let mut dst = copy::presized_sequence(LENGTH);
    copy::append_from_mapping(src, &mut dst);
    assert_eq!(dst.len(), LENGTH);

    let mut tags: Vec<i64> = dst.iter().map(|o| o.a).collect();
    tags.sort_unstable();
    assert_eq!(tags, (0..LENGTH as i64).collect::<Vec<_>>());
}

#[test]
fn insert_variants_fill_all_slots() {
    let mut from_map = copy::empty_slots(LENGTH);
    copy::insert_from_mapping(build_mapping(LENGTH), &mut from_map).unwrap();
    let mut from_seq = copy::empty_slots(LENGTH);
    copy::insert_from_sequence(build_sequence(LENGTH), &mut from_seq).unwrap();
    assert_eq!(from_map.len(), LENGTH);
    assert_eq!(from_seq.len(), LENGTH);
    assert!(from_map.iter().all(Option::is_some));
    assert!(from_seq.iter().all(Option::is_some));
}

// ── Allocation counting ─────────────────────────────────────────────
//
// Other tests allocate on their own threads, so only lower bounds hold.

#[test]
fn building_a_sequence_allocates_per_record() {
    let n = 64;
    let (seq, delta) = alloc_counter::measure(|| build_sequence(n));
    assert_eq!(seq.len(), n);
    // Per record: the Outer box, its child vec and the Inner box; plus the spine.
    assert!(
        delta.allocations >= 3 * n as u64 + 1,
        "expected at least {} allocations, got {}",
        3 * n + 1,
        delta.allocations
    );
    assert!(delta.bytes > 0);
}

#[test]
fn dropping_a_container_is_counted() {
    let seq = build_sequence(16);
    let before = alloc_counter::snapshot();
    drop(seq);
    let delta = alloc_counter::snapshot().since(&before);
    assert!(delta.deallocations >= 3 * 16 + 1);
}

// ── Workload catalogue ──────────────────────────────────────────────

#[test]
fn catalogue_covers_three_groups() {
    let count = |g: Group| Workload::ALL.iter().filter(|w| w.group() == g).count();
    assert_eq!(count(Group::Iterate), 2);
    assert_eq!(count(Group::Construct), 6);
    assert_eq!(count(Group::Copy), 4);
}

#[test]
fn every_workload_produces_a_result() {
    for w in Workload::ALL {
        let mut result = WorkloadResult::new(w, LENGTH);
        for _ in 0..3 {
            result.add_sample(&w.run_batch(LENGTH, 5).unwrap());
        }
        assert_eq!(result.total_iterations, 15, "{}", w.name());
        assert_eq!(result.sample_ns_per_op.len(), 3);
        assert!(result.mean_ns() >= 0.0);
    }
}

#[test]
fn create_construction_allocates_per_record() {
    let mut create = WorkloadResult::new(Workload::CreateSliceConstruction, LENGTH);
    create.add_sample(&Workload::CreateSliceConstruction.run_batch(LENGTH, 5).unwrap());
    assert!(create.allocs_per_op() >= (3 * LENGTH + 1) as f64);
}
