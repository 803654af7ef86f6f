//! Non-owning views over a [`Mat`](crate::math::Mat) buffer.
//!
//! A view never copies the backing data. It carries an [`Addressing`] that
//! describes which physical offsets of the buffer make up its logical
//! elements, and walks them through [`Offsets`]. The order is column-major
//! over the view's logical shape, so a right-hand-side matrix of the same
//! shape lines up element for element with its own buffer.
//!
//! Index-list addressing (`Elem`, `Cols`, `Cross`) performs no bounds
//! validation. Indices are turned into linear offsets and the slice is
//! indexed directly, so only an offset at or past the buffer length panics.
//! A cross-product row index beyond the backing height but inside the buffer
//! reads or writes an element of a later column. Range-based addressing is
//! only ever built by the facade after its bounds have been checked.

use std::iter::FusedIterator;

use crate::error::{MatError, Result};
use crate::math::op::{self, Op, Operand};
use crate::math::Mat;

/// Convert an index stored as a double into a buffer offset.
///
/// Finite values are truncated toward zero. Negative and NaN values map to
/// `usize::MAX` so that the subsequent access faults instead of aliasing
/// offset 0. This differs from a C-style integer cast, which turns NaN into 0
/// and would silently address the first element.
#[inline]
pub(crate) fn offset_of(index: f64) -> usize {
    let truncated = index.trunc();
    if truncated >= 0.0 {
        truncated as usize
    } else {
        usize::MAX
    }
}

/// One axis of a cross-product view: either every position or an explicit list.
#[derive(Clone, Copy, Debug)]
pub enum IndexList<'i> {
    All(usize),
    Listed(&'i [f64]),
}

impl IndexList<'_> {
    pub fn len(&self) -> usize {
        match self {
            IndexList::All(n) => *n,
            IndexList::Listed(indices) => indices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn position(&self, k: usize) -> usize {
        match self {
            IndexList::All(_) => k,
            IndexList::Listed(indices) => offset_of(indices[k]),
        }
    }
}

/// The addressing law of a view.
///
/// Each variant reproduces one way of walking a column-major buffer with
/// `backing_rows` rows.
#[derive(Clone, Copy, Debug)]
pub enum Addressing<'i> {
    /// One row, `n_cols` wide. Consecutive elements are `stride` apart.
    Row {
        start: usize,
        stride: usize,
        n_cols: usize,
    },
    /// A block of `n_rows` consecutive rows and `n_cols` consecutive columns.
    /// After the last row of a column, `skip` rows are jumped over to reach the
    /// first row of the next column.
    Rows {
        start: usize,
        n_rows: usize,
        n_cols: usize,
        skip: usize,
    },
    /// Arbitrary element offsets, shaped as a column vector.
    Elem { indices: &'i [f64] },
    /// Whole columns picked by index.
    Cols {
        col_indices: &'i [f64],
        backing_rows: usize,
    },
    /// The cross product of a row list and a column list.
    Cross {
        row_indices: IndexList<'i>,
        col_indices: IndexList<'i>,
        backing_rows: usize,
    },
}

impl<'i> Addressing<'i> {
    /// Row `row` of a buffer with `backing_rows` rows, restricted to
    /// `n_cols` columns starting at `first_col`.
    pub fn row(backing_rows: usize, row: usize, first_col: usize, n_cols: usize) -> Self {
        Addressing::Row {
            start: row + first_col * backing_rows,
            stride: backing_rows,
            n_cols,
        }
    }

    /// Rows `first_row..=last_row` of a buffer with `backing_rows` rows,
    /// restricted to `n_cols` columns starting at `first_col`.
    ///
    /// # Panics
    ///
    /// Panics if `first_row > last_row` or `last_row >= backing_rows`.
    /// [`Mat::addressing`] validates both before calling this.
    pub fn rows(
        backing_rows: usize,
        first_row: usize,
        last_row: usize,
        first_col: usize,
        n_cols: usize,
    ) -> Self {
        assert!(
            first_row <= last_row && last_row < backing_rows,
            "row range {}..={} does not fit a buffer with {} rows",
            first_row,
            last_row,
            backing_rows
        );
        let n_rows = last_row - first_row + 1;
        Addressing::Rows {
            start: first_row + first_col * backing_rows,
            n_rows,
            n_cols,
            skip: backing_rows - n_rows,
        }
    }

    pub fn elem(indices: &'i [f64]) -> Self {
        Addressing::Elem { indices }
    }

    pub fn cols(backing_rows: usize, col_indices: &'i [f64]) -> Self {
        Addressing::Cols {
            col_indices,
            backing_rows,
        }
    }

    pub fn cross(backing_rows: usize, row_indices: IndexList<'i>, col_indices: IndexList<'i>) -> Self {
        Addressing::Cross {
            row_indices,
            col_indices,
            backing_rows,
        }
    }

    pub fn n_rows(&self) -> usize {
        match self {
            Addressing::Row { .. } => 1,
            Addressing::Rows { n_rows, .. } => *n_rows,
            Addressing::Elem { indices } => indices.len(),
            Addressing::Cols { backing_rows, .. } => *backing_rows,
            Addressing::Cross { row_indices, .. } => row_indices.len(),
        }
    }

    pub fn n_cols(&self) -> usize {
        match self {
            Addressing::Row { n_cols, .. } | Addressing::Rows { n_cols, .. } => *n_cols,
            Addressing::Elem { .. } => 1,
            Addressing::Cols { col_indices, .. } => col_indices.len(),
            Addressing::Cross { col_indices, .. } => col_indices.len(),
        }
    }

    pub fn n_elem(&self) -> usize {
        self.n_rows() * self.n_cols()
    }

    /// Whether the logical shape is a column vector (`n_rows x 1`).
    pub fn is_col(&self) -> bool {
        self.n_cols() == 1
    }

    pub fn offsets(&self) -> Offsets<'_, 'i> {
        Offsets::new(self)
    }
}

/// Pull-based walk over the physical offsets of an [`Addressing`].
///
/// Yields exactly `n_elem` offsets, then `None`. [`Offsets::reset`] rewinds
/// to the start.
#[derive(Clone, Debug)]
pub struct Offsets<'a, 'i> {
    addressing: &'a Addressing<'i>,
    n_elem: usize,
    produced: usize,
    // Next physical offset for the strided laws.
    cursor: usize,
    // Position within the current logical column.
    row: usize,
    // Current logical column for the index-list laws.
    col: usize,
}

impl<'a, 'i> Offsets<'a, 'i> {
    fn new(addressing: &'a Addressing<'i>) -> Self {
        let mut offsets = Offsets {
            addressing,
            n_elem: addressing.n_elem(),
            produced: 0,
            cursor: 0,
            row: 0,
            col: 0,
        };
        offsets.reset();
        offsets
    }

    pub fn reset(&mut self) {
        self.produced = 0;
        self.row = 0;
        self.col = 0;
        self.cursor = match self.addressing {
            Addressing::Row { start, .. } | Addressing::Rows { start, .. } => *start,
            _ => 0,
        };
    }

    pub fn is_col(&self) -> bool {
        self.addressing.is_col()
    }
}

impl Iterator for Offsets<'_, '_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.produced >= self.n_elem {
            return None;
        }
        let k = self.produced;
        self.produced += 1;

        let offset = match *self.addressing {
            Addressing::Row { stride, .. } => {
                let offset = self.cursor;
                self.cursor += stride;
                offset
            }
            Addressing::Rows { n_rows, skip, .. } => {
                let offset = self.cursor;
                self.row += 1;
                if self.row == n_rows {
                    self.row = 0;
                    self.cursor += skip + 1;
                } else {
                    self.cursor += 1;
                }
                offset
            }
            Addressing::Elem { indices } => offset_of(indices[k]),
            Addressing::Cols {
                col_indices,
                backing_rows,
            } => {
                let base = offset_of(col_indices[self.col]).saturating_mul(backing_rows);
                let offset = base.saturating_add(self.row);
                self.row += 1;
                if self.row == backing_rows {
                    self.row = 0;
                    self.col += 1;
                }
                offset
            }
            Addressing::Cross {
                row_indices,
                col_indices,
                backing_rows,
            } => {
                let r = row_indices.position(self.row);
                let c = col_indices.position(self.col);
                self.row += 1;
                if self.row == row_indices.len() {
                    self.row = 0;
                    self.col += 1;
                }
                c.saturating_mul(backing_rows).saturating_add(r)
            }
        };
        Some(offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.n_elem - self.produced;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Offsets<'_, '_> {}

impl FusedIterator for Offsets<'_, '_> {}

/// Values read through an [`Offsets`] walk.
#[derive(Clone, Debug)]
pub struct Values<'a, 'i> {
    data: &'a [f64],
    offsets: Offsets<'a, 'i>,
}

impl Iterator for Values<'_, '_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.offsets.next().map(|n| self.data[n])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

impl ExactSizeIterator for Values<'_, '_> {}

/// A view over buffer storage `D`.
///
/// `View` borrows the buffer shared and can only read; `ViewMut` borrows it
/// exclusively and supports in-place operators.
#[derive(Debug)]
pub struct ViewBase<'i, D> {
    data: D,
    addressing: Addressing<'i>,
}

pub type View<'a> = ViewBase<'a, &'a [f64]>;
pub type ViewMut<'a> = ViewBase<'a, &'a mut [f64]>;

impl<'i, D> ViewBase<'i, D>
where
    D: AsRef<[f64]>,
{
    pub fn new(data: D, addressing: Addressing<'i>) -> Self {
        log::debug!(
            "constructing {}x{} view over {} elements: {:?}",
            addressing.n_rows(),
            addressing.n_cols(),
            data.as_ref().len(),
            addressing
        );
        Self { data, addressing }
    }

    pub fn n_rows(&self) -> usize {
        self.addressing.n_rows()
    }

    pub fn n_cols(&self) -> usize {
        self.addressing.n_cols()
    }

    pub fn n_elem(&self) -> usize {
        self.addressing.n_elem()
    }

    pub fn is_col(&self) -> bool {
        self.addressing.is_col()
    }

    pub fn addressing(&self) -> &Addressing<'i> {
        &self.addressing
    }

    pub fn offsets(&self) -> Offsets<'_, 'i> {
        self.addressing.offsets()
    }

    /// The view's elements in logical (column-major) order.
    ///
    /// # Panics
    ///
    /// Panics if an index-list view refers to an offset outside the buffer.
    pub fn iter(&self) -> Values<'_, 'i> {
        Values {
            data: self.data.as_ref(),
            offsets: self.offsets(),
        }
    }

    /// Element at logical offset `k`.
    pub fn get(&self, k: usize) -> Option<f64> {
        self.offsets().nth(k).map(|n| self.data.as_ref()[n])
    }

    /// Copy the selected elements into a new matrix of the view's shape.
    pub fn to_mat(&self) -> Mat {
        let values: Vec<f64> = self.iter().collect();
        Mat::from_parts(self.n_rows(), self.n_cols(), values)
    }

    /// Element-wise comparison of the selected elements against `operand`.
    pub fn compare<'o>(&self, op: Op, operand: impl Into<Operand<'o>>) -> Result<Mat> {
        let operand = operand.into();
        self.check_operand(&operand, "comparison")?;
        let values = op::compare(self.iter(), op, operand)?;
        Ok(Mat::from_parts(self.n_rows(), self.n_cols(), values))
    }

    fn check_operand(&self, operand: &Operand<'_>, context: &'static str) -> Result<()> {
        match operand {
            Operand::Mat(m) if m.n_elem() != self.n_elem() => Err(MatError::SizeMismatch {
                context,
                lhs: (self.n_rows(), self.n_cols()),
                rhs: m.shape(),
            }),
            _ => Ok(()),
        }
    }
}

impl<'i, D> ViewBase<'i, D>
where
    D: AsRef<[f64]> + AsMut<[f64]>,
{
    /// Write `value` at logical offset `k`. Returns `false` past the end.
    pub fn set(&mut self, k: usize, value: f64) -> bool {
        match self.addressing.offsets().nth(k) {
            Some(n) => {
                self.data.as_mut()[n] = value;
                true
            }
            None => false,
        }
    }

    /// Apply a unary operator to every selected element.
    ///
    /// # Panics
    ///
    /// Panics if an index-list view refers to an offset outside the buffer.
    pub fn apply(&mut self, op: Op) -> Result<()> {
        op::apply_unary(self.data.as_mut(), self.addressing.offsets(), op)
    }

    /// Apply a binary operator with a scalar or matrix right-hand side.
    ///
    /// A matrix operand must have as many elements as the view.
    ///
    /// # Panics
    ///
    /// Panics if an index-list view refers to an offset outside the buffer.
    pub fn apply_with<'o>(&mut self, op: Op, operand: impl Into<Operand<'o>>) -> Result<()> {
        let operand = operand.into();
        self.check_operand(&operand, "in-place operation")?;
        op::apply_binary(self.data.as_mut(), self.addressing.offsets(), op, operand)
    }
}
