//! Payload records stored in the benchmark containers.

mod inner;
mod outer;

pub use inner::Inner;
pub use outer::Outer;
