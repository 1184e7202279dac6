use super::Inner;

/// Record held by every benchmark container.
///
/// `c` owns its children through boxes so that building an `Outer` costs one
/// heap allocation per child, mirroring a pointer-per-element layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outer {
    pub a: i64,
    pub b: String,
    pub c: Vec<Box<Inner>>,
}

impl Outer {
    /// Zero scalars and a single zeroed child.
    pub fn zeroed() -> Self {
        Self {
            a: 0,
            b: String::new(),
            c: vec![Box::new(Inner::zeroed())],
        }
    }

    /// True when the scalars are zero and `c` holds exactly one zeroed child.
    pub fn is_canonical(&self) -> bool {
        self.a == 0
            && self.b.is_empty()
            && self.c.len() == 1
            && self.c.iter().all(|inner| inner.is_zeroed())
    }
}
