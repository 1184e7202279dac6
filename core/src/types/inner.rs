/// Leaf record: one integer, one string, one byte buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inner {
    pub a: i64,
    pub b: String,
    pub c: Vec<u8>,
}

impl Inner {
    /// Zero integer, empty string, empty bytes.
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn is_zeroed(&self) -> bool {
        self.a == 0 && self.b.is_empty() && self.c.is_empty()
    }
}
