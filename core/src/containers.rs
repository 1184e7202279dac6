//! Construction helpers for the two container kinds under comparison.

use crate::types::Outer;
use std::collections::HashMap;

/// Position-indexed container of owned records.
pub type Sequence = Vec<Box<Outer>>;

/// Key-indexed container of owned records.
pub type Mapping = HashMap<usize, Box<Outer>>;

/// Build `n` canonical records in order.
pub fn build_sequence(n: usize) -> Sequence {
    let mut seq = Vec::with_capacity(n);
    for _ in 0..n {
        seq.push(Box::new(Outer::zeroed()));
    }
    seq
}

/// Build `n` canonical records keyed `0..n`.
pub fn build_mapping(n: usize) -> Mapping {
    let mut map = HashMap::with_capacity(n);
    for key in 0..n {
        map.insert(key, Box::new(Outer::zeroed()));
    }
    map
}
