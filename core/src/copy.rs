//! Copy-like operations: drain a source container into a caller-owned
//! destination sequence.
//!
//! Destinations are built by the caller, outside whatever region is being
//! measured: [`presized_sequence`] reserves capacity for `append_*`, and
//! [`empty_slots`] pre-sizes by length for `insert_*`. With a correctly sized
//! destination none of these operations allocate.

use crate::containers::{Mapping, Sequence};
use crate::types::Outer;
use std::fmt;

/// Destination of the `insert_*` operations. Every slot is `Some` on success.
pub type Slots = Vec<Option<Box<Outer>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyError {
    /// A key or position does not name a slot of the destination.
    SlotOutOfRange { slot: usize, len: usize },
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyError::SlotOutOfRange { slot, len } => {
                write!(f, "slot {slot} out of range for {len} slots")
            }
        }
    }
}

impl std::error::Error for CopyError {}

/// Empty sequence with room for `len` records.
pub fn presized_sequence(len: usize) -> Sequence {
    Vec::with_capacity(len)
}

/// `len` unfilled slots.
pub fn empty_slots(len: usize) -> Slots {
    let mut slots = Vec::with_capacity(len);
    slots.resize_with(len, || None);
    slots
}

/// Push every value of `src` onto `dst`. Order is unspecified.
pub fn append_from_mapping(src: Mapping, dst: &mut Sequence) {
    for (_, outer) in src {
        dst.push(outer);
    }
}

/// Push every element of `src` onto `dst`, preserving order.
pub fn append_from_sequence(src: Sequence, dst: &mut Sequence) {
    for outer in src {
        dst.push(outer);
    }
}

/// Write each value of `src` into the slot of `dst` named by its key.
pub fn insert_from_mapping(src: Mapping, dst: &mut Slots) -> Result<(), CopyError> {
    for (key, outer) in src {
        fill_slot(dst, key, outer)?;
    }
    Ok(())
}

/// Write each element of `src` into the slot of `dst` at its position.
pub fn insert_from_sequence(src: Sequence, dst: &mut Slots) -> Result<(), CopyError> {
    for (idx, outer) in src.into_iter().enumerate() {
        fill_slot(dst, idx, outer)?;
    }
    Ok(())
}

#[inline]
fn fill_slot(dst: &mut Slots, slot: usize, outer: Box<Outer>) -> Result<(), CopyError> {
    let len = dst.len();
    let target = dst
        .get_mut(slot)
        .ok_or(CopyError::SlotOutOfRange { slot, len })?;
    *target = Some(outer);
    Ok(())
}
