/// A closed range `first..=last` along one axis, or the entire axis.
///
/// When `is_entire_range` is set the positions are ignored by every consumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub first: usize,
    pub last: usize,
    pub is_entire_range: bool,
}

impl Span {
    pub fn new(first: usize, last: usize) -> Self {
        Self {
            first,
            last,
            is_entire_range: false,
        }
    }

    /// The whole axis.
    pub fn all() -> Self {
        Self {
            first: 0,
            last: 0,
            is_entire_range: true,
        }
    }

    pub fn single(position: usize) -> Self {
        Self::new(position, position)
    }
}

impl Default for Span {
    fn default() -> Self {
        Span::all()
    }
}

/// Extent of a block, as used by `Selection::SubmatSize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub n_rows: usize,
    pub n_cols: usize,
}

impl Size {
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self { n_rows, n_cols }
    }

    pub fn n_elem(&self) -> usize {
        self.n_rows * self.n_cols
    }
}
