//! The benchmark catalogue: one entry per timed operation.
//!
//! Routines are plain functions so the criterion harness can call them
//! directly; [`Workload`] ties each one to a stable name and knows how to
//! run a timed batch for the standalone runner.

use crate::alloc_counter::{self, AllocSnapshot};
use anyhow::Result;
use bench_core::containers::{build_mapping, build_sequence, Mapping, Sequence};
use bench_core::copy::{self, Slots};
use std::collections::HashMap;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Visit every (key, value) pair. Returns the number visited.
pub fn iterate_mapping(map: &Mapping) -> usize {
    let mut visited = 0;
    for (key, value) in map {
        black_box(key);
        black_box(value);
        visited += 1;
    }
    visited
}

/// Visit every (index, item) pair. Returns the number visited.
pub fn iterate_sequence(seq: &Sequence) -> usize {
    let mut visited = 0;
    for (idx, item) in seq.iter().enumerate() {
        black_box(idx);
        black_box(item);
        visited += 1;
    }
    visited
}

pub fn basic_mapping() -> Mapping {
    HashMap::new()
}

pub fn basic_sequence() -> Sequence {
    Vec::new()
}

/// Empty mapping with room for `len` entries.
pub fn make_mapping(len: usize) -> Mapping {
    HashMap::with_capacity(len)
}

/// `len` unfilled slots.
pub fn make_sequence(len: usize) -> Slots {
    copy::empty_slots(len)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Iterate,
    Construct,
    Copy,
}

impl Group {
    pub fn name(&self) -> &'static str {
        match self {
            Group::Iterate => "iterate",
            Group::Construct => "construct",
            Group::Copy => "copy",
        }
    }
}

/// Which container a workload exercises as its source (or product).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Map,
    Slice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workload {
    MapIterations,
    SliceIterations,
    CreateMapConstruction,
    CreateSliceConstruction,
    BasicMapConstruction,
    BasicSliceConstruction,
    MakeMapConstruction,
    MakeSliceConstruction,
    AppendToSliceFromMap,
    AppendToSliceFromSlice,
    InsertIntoSliceFromMap,
    InsertIntoSliceFromSlice,
}

impl Workload {
    pub const ALL: [Workload; 12] = [
        Workload::MapIterations,
        Workload::SliceIterations,
        Workload::CreateMapConstruction,
        Workload::CreateSliceConstruction,
        Workload::BasicMapConstruction,
        Workload::BasicSliceConstruction,
        Workload::MakeMapConstruction,
        Workload::MakeSliceConstruction,
        Workload::AppendToSliceFromMap,
        Workload::AppendToSliceFromSlice,
        Workload::InsertIntoSliceFromMap,
        Workload::InsertIntoSliceFromSlice,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Workload::MapIterations => "map_iterations",
            Workload::SliceIterations => "slice_iterations",
            Workload::CreateMapConstruction => "create_map_construction",
            Workload::CreateSliceConstruction => "create_slice_construction",
            Workload::BasicMapConstruction => "basic_map_construction",
            Workload::BasicSliceConstruction => "basic_slice_construction",
            Workload::MakeMapConstruction => "make_map_construction",
            Workload::MakeSliceConstruction => "make_slice_construction",
            Workload::AppendToSliceFromMap => "append_to_slice_from_map",
            Workload::AppendToSliceFromSlice => "append_to_slice_from_slice",
            Workload::InsertIntoSliceFromMap => "insert_into_slice_from_map",
            Workload::InsertIntoSliceFromSlice => "insert_into_slice_from_slice",
        }
    }

    pub fn group(&self) -> Group {
        match self {
            Workload::MapIterations | Workload::SliceIterations => Group::Iterate,
            Workload::CreateMapConstruction
            | Workload::CreateSliceConstruction
            | Workload::BasicMapConstruction
            | Workload::BasicSliceConstruction
            | Workload::MakeMapConstruction
            | Workload::MakeSliceConstruction => Group::Construct,
            Workload::AppendToSliceFromMap
            | Workload::AppendToSliceFromSlice
            | Workload::InsertIntoSliceFromMap
            | Workload::InsertIntoSliceFromSlice => Group::Copy,
        }
    }

    pub fn container(&self) -> Container {
        match self {
            Workload::MapIterations
            | Workload::CreateMapConstruction
            | Workload::BasicMapConstruction
            | Workload::MakeMapConstruction
            | Workload::AppendToSliceFromMap
            | Workload::InsertIntoSliceFromMap => Container::Map,
            _ => Container::Slice,
        }
    }

    /// The same operation on the other container kind.
    pub fn counterpart(&self) -> Workload {
        match self {
            Workload::MapIterations => Workload::SliceIterations,
            Workload::SliceIterations => Workload::MapIterations,
            Workload::CreateMapConstruction => Workload::CreateSliceConstruction,
            Workload::CreateSliceConstruction => Workload::CreateMapConstruction,
            Workload::BasicMapConstruction => Workload::BasicSliceConstruction,
            Workload::BasicSliceConstruction => Workload::BasicMapConstruction,
            Workload::MakeMapConstruction => Workload::MakeSliceConstruction,
            Workload::MakeSliceConstruction => Workload::MakeMapConstruction,
            Workload::AppendToSliceFromMap => Workload::AppendToSliceFromSlice,
            Workload::AppendToSliceFromSlice => Workload::AppendToSliceFromMap,
            Workload::InsertIntoSliceFromMap => Workload::InsertIntoSliceFromSlice,
            Workload::InsertIntoSliceFromSlice => Workload::InsertIntoSliceFromMap,
        }
    }

    pub fn from_name(name: &str) -> Option<Workload> {
        Workload::ALL.iter().copied().find(|w| w.name() == name)
    }

    /// Run `iterations` timed operations over containers of `len` records.
    ///
    /// Source containers and copy destinations are built before the clock
    /// starts and products are dropped after it stops, so only the operation
    /// itself is measured. Work is done in chunks of [`CHUNK_SIZE`] so live
    /// inputs and outputs stay bounded however large the batch is.
    pub fn run_batch(&self, len: usize, iterations: usize) -> Result<BatchSample> {
        match self {
            Workload::MapIterations => {
                let map = build_mapping(len);
                timed(iterations, || {
                    for _ in 0..iterations {
                        black_box(iterate_mapping(black_box(&map)));
                    }
                    Ok(())
                })
            }
            Workload::SliceIterations => {
                let seq = build_sequence(len);
                timed(iterations, || {
                    for _ in 0..iterations {
                        black_box(iterate_sequence(black_box(&seq)));
                    }
                    Ok(())
                })
            }
            Workload::CreateMapConstruction => {
                collect_products(iterations, || black_box(build_mapping(len)))
            }
            Workload::CreateSliceConstruction => {
                collect_products(iterations, || black_box(build_sequence(len)))
            }
            Workload::BasicMapConstruction => collect_products(iterations, basic_mapping),
            Workload::BasicSliceConstruction => collect_products(iterations, basic_sequence),
            Workload::MakeMapConstruction => collect_products(iterations, || make_mapping(len)),
            Workload::MakeSliceConstruction => {
                collect_products(iterations, || make_sequence(len))
            }
            Workload::AppendToSliceFromMap => drain_sources(
                iterations,
                || (build_mapping(len), copy::presized_sequence(len)),
                |(src, mut dst)| {
                    copy::append_from_mapping(src, &mut dst);
                    Ok(dst)
                },
            ),
            Workload::AppendToSliceFromSlice => drain_sources(
                iterations,
                || (build_sequence(len), copy::presized_sequence(len)),
                |(src, mut dst)| {
                    copy::append_from_sequence(src, &mut dst);
                    Ok(dst)
                },
            ),
            Workload::InsertIntoSliceFromMap => drain_sources(
                iterations,
                || (build_mapping(len), copy::empty_slots(len)),
                |(src, mut dst)| {
                    copy::insert_from_mapping(src, &mut dst)?;
                    Ok(dst)
                },
            ),
            Workload::InsertIntoSliceFromSlice => drain_sources(
                iterations,
                || (build_sequence(len), copy::empty_slots(len)),
                |(src, mut dst)| {
                    copy::insert_from_sequence(src, &mut dst)?;
                    Ok(dst)
                },
            ),
        }
    }
}

/// Iterations timed back to back before inputs are rebuilt and outputs dropped.
pub const CHUNK_SIZE: usize = 1_000;

/// Wall time and allocations for one batch of iterations.
#[derive(Debug, Default, Clone, Copy)]
pub struct BatchSample {
    pub iterations: usize,
    pub elapsed: Duration,
    pub allocs: AllocSnapshot,
}

impl BatchSample {
    fn absorb(&mut self, other: &BatchSample) {
        self.iterations += other.iterations;
        self.elapsed += other.elapsed;
        self.allocs.allocations += other.allocs.allocations;
        self.allocs.bytes += other.allocs.bytes;
        self.allocs.deallocations += other.allocs.deallocations;
    }
}

/// Sizes of the chunks `iterations` is split into.
fn chunk_sizes(iterations: usize) -> impl Iterator<Item = usize> {
    (0..iterations)
        .step_by(CHUNK_SIZE)
        .map(move |start| CHUNK_SIZE.min(iterations - start))
}

fn timed(iterations: usize, body: impl FnOnce() -> Result<()>) -> Result<BatchSample> {
    let before = alloc_counter::snapshot();
    let start = Instant::now();
    body()?;
    let elapsed = start.elapsed();
    let allocs = alloc_counter::snapshot().since(&before);
    Ok(BatchSample {
        iterations,
        elapsed,
        allocs,
    })
}

/// Time calls of `make`, keeping each chunk's products alive until the clock
/// has stopped.
fn collect_products<T>(iterations: usize, mut make: impl FnMut() -> T) -> Result<BatchSample> {
    let mut total = BatchSample::default();
    let mut products = Vec::with_capacity(CHUNK_SIZE.min(iterations));
    for chunk in chunk_sizes(iterations) {
        let sample = timed(chunk, || {
            for _ in 0..chunk {
                products.push(make());
            }
            Ok(())
        })?;
        total.absorb(&sample);
        products.clear();
    }
    Ok(total)
}

/// Build one input per iteration of a chunk, then time draining each.
fn drain_sources<S, T>(
    iterations: usize,
    mut setup: impl FnMut() -> S,
    mut op: impl FnMut(S) -> Result<T>,
) -> Result<BatchSample> {
    let mut total = BatchSample::default();
    let mut products = Vec::with_capacity(CHUNK_SIZE.min(iterations));
    for chunk in chunk_sizes(iterations) {
        let sources: Vec<S> = (0..chunk).map(|_| setup()).collect();
        let sample = timed(chunk, || {
            for src in sources {
                products.push(black_box(op(src)?));
            }
            Ok(())
        })?;
        total.absorb(&sample);
        products.clear();
    }
    Ok(total)
}
