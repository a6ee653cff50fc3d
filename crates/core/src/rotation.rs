//! Rotation cursor over the configured game sequence.

/// Position in a non-empty, cyclic game sequence.
///
/// A plain value: advancing returns the next cursor instead of mutating
/// hidden state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    cursor: usize,
    len: usize,
}

impl Rotation {
    /// `None` for an empty sequence.
    pub fn new(len: usize) -> Option<Self> {
        if len == 0 {
            None
        } else {
            Some(Self { cursor: 0, len })
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn advance(self) -> Self {
        Self {
            cursor: (self.cursor + 1) % self.len,
            len: self.len,
        }
    }
}
