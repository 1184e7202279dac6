//! Map vs. Slice Container Benchmark
//!
//! Compares a keyed mapping (`HashMap<usize, Box<Outer>>`) against an ordered
//! sequence (`Vec<Box<Outer>>`) under three kinds of work:
//! - **Iteration** over a prebuilt container
//! - **Construction**, both fully populated and empty / pre-sized
//! - **Copy** of every record into a pre-sized destination sequence
//!
//! Run benchmarks: `cargo bench`
//! Run the standalone report: `cargo run --release`
//! Run tests: `cargo test`

pub mod alloc_counter;
pub mod config;
pub mod report;
pub mod workloads;
