use std::fmt;
use std::ops::{Index, IndexMut, Range};

use crate::error::{MatError, Result};
use crate::math::op::{self, Op, Operand};
use crate::math::span::{Size, Span};
use crate::math::view::{Addressing, IndexList, View, ViewMut};

/// A dense, column-major matrix of doubles.
///
/// Element `(i, j)` lives at offset `i + j * n_rows` of the buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mat {
    data: Vec<f64>,
    n_rows: usize,
    n_cols: usize,
}

/// A logical subset of a matrix to read or operate on.
///
/// Range-based selections are bounds-checked before anything is touched.
/// Index-list selections (`Elem`, `RowsIndexed`, `ColsIndexed`,
/// `SubmatIndexed`) are not. Each index is combined into a linear offset
/// `r + c * n_rows`, and only an offset past the end of the buffer panics.
/// A row index at or beyond `n_rows` with a small enough column lands in a
/// later column instead. Indices are doubles truncated toward zero.
#[derive(Clone, Copy, Debug)]
pub enum Selection<'i> {
    All,
    Row(usize),
    Col(usize),
    Rows {
        first: usize,
        last: usize,
    },
    Cols {
        first: usize,
        last: usize,
    },
    /// Part of one row.
    RowSpan {
        row: usize,
        cols: Span,
    },
    /// Part of one column.
    ColSpan {
        rows: Span,
        col: usize,
    },
    Submat {
        first_row: usize,
        first_col: usize,
        last_row: usize,
        last_col: usize,
    },
    SubmatSpans {
        rows: Span,
        cols: Span,
    },
    SubmatSize {
        first_row: usize,
        first_col: usize,
        size: Size,
    },
    /// Linear element offsets, selected as a column vector.
    Elem(&'i [f64]),
    RowsIndexed(&'i [f64]),
    ColsIndexed(&'i [f64]),
    SubmatIndexed {
        rows: &'i [f64],
        cols: &'i [f64],
    },
}

impl<'i> Selection<'i> {
    pub fn rows(first: usize, last: usize) -> Self {
        Selection::Rows { first, last }
    }

    pub fn cols(first: usize, last: usize) -> Self {
        Selection::Cols { first, last }
    }

    pub fn submat(first_row: usize, first_col: usize, last_row: usize, last_col: usize) -> Self {
        Selection::Submat {
            first_row,
            first_col,
            last_row,
            last_col,
        }
    }
}

impl Mat {
    /// An empty `0 x 0` matrix.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self::from_elem(n_rows, n_cols, 0.0)
    }

    pub fn ones(n_rows: usize, n_cols: usize) -> Self {
        Self::from_elem(n_rows, n_cols, 1.0)
    }

    pub fn from_elem(n_rows: usize, n_cols: usize, value: f64) -> Self {
        Self::from_parts(n_rows, n_cols, vec![value; n_rows * n_cols])
    }

    /// Build from a buffer already in column-major order.
    pub fn from_col_major(n_rows: usize, n_cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != n_rows * n_cols {
            return Err(MatError::Shape {
                n_rows,
                n_cols,
                len: data.len(),
            });
        }
        Ok(Self::from_parts(n_rows, n_cols, data))
    }

    /// Build from a buffer listing the matrix row by row.
    pub fn from_row_major(n_rows: usize, n_cols: usize, data: Vec<f64>) -> Result<Self> {
        let transposed = Self::from_col_major(n_cols, n_rows, data)?;
        Ok(transposed.t())
    }

    /// An `n x 1` column vector.
    pub fn col_vec(data: Vec<f64>) -> Self {
        Self::from_parts(data.len(), 1, data)
    }

    /// A `1 x n` row vector.
    pub fn row_vec(data: Vec<f64>) -> Self {
        Self::from_parts(1, data.len(), data)
    }

    pub(crate) fn from_parts(n_rows: usize, n_cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), n_rows * n_cols);
        Self { data, n_rows, n_cols }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn n_elem(&self) -> usize {
        self.n_rows * self.n_cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Physical offsets of the whole buffer in logical order.
    pub fn offsets(&self) -> Range<usize> {
        0..self.n_elem()
    }

    pub fn is_empty(&self) -> bool {
        self.n_elem() == 0
    }

    pub fn is_col(&self) -> bool {
        self.n_cols == 1
    }

    pub fn is_row(&self) -> bool {
        self.n_rows == 1
    }

    /// True if no element is infinite or NaN.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    pub fn in_range(&self, n: usize) -> bool {
        n < self.n_elem()
    }

    pub fn in_range_span(&self, span: Span) -> bool {
        span.is_entire_range || (span.first <= span.last && span.last < self.n_elem())
    }

    pub fn in_range_at(&self, row: usize, col: usize) -> bool {
        row < self.n_rows && col < self.n_cols
    }

    pub fn in_range_spans(&self, row_span: Span, col_span: Span) -> bool {
        let fits = |span: Span, len: usize| {
            span.is_entire_range || (span.first <= span.last && span.last < len)
        };
        fits(row_span, self.n_rows) && fits(col_span, self.n_cols)
    }

    pub fn in_range_block(&self, first_row: usize, first_col: usize, size: Size) -> bool {
        let fits = |first: usize, count: usize, len: usize| {
            first.checked_add(count).map_or(false, |end| end <= len)
        };
        fits(first_row, size.n_rows, self.n_rows) && fits(first_col, size.n_cols, self.n_cols)
    }

    /// Make the matrix empty.
    pub fn reset(&mut self) {
        self.data = Vec::new();
        self.n_rows = 0;
        self.n_cols = 0;
    }

    pub fn clear(&mut self) {
        self.reset();
    }

    /// Change the shape, discarding the contents. The new buffer is zero-filled.
    pub fn set_size(&mut self, n_rows: usize, n_cols: usize) {
        log::debug!("resizing ({}, {}) -> ({}, {})", self.n_rows, self.n_cols, n_rows, n_cols);
        self.data = vec![0.0; n_rows * n_cols];
        self.n_rows = n_rows;
        self.n_cols = n_cols;
    }

    pub fn copy_size(&mut self, other: &Mat) {
        self.set_size(other.n_rows, other.n_cols);
    }

    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Smallest value. A NaN anywhere makes the result NaN.
    pub fn min(&self) -> Result<f64> {
        self.fold_nan_propagating(f64::min)
    }

    /// Largest value. A NaN anywhere makes the result NaN.
    pub fn max(&self) -> Result<f64> {
        self.fold_nan_propagating(f64::max)
    }

    // `f64::min`/`f64::max` ignore NaN operands, so NaN is carried explicitly.
    fn fold_nan_propagating(&self, pick: fn(f64, f64) -> f64) -> Result<f64> {
        let (&first, rest) = self.data.split_first().ok_or(MatError::EmptyCollection)?;
        Ok(rest.iter().fold(first, |best, &value| {
            if best.is_nan() || value.is_nan() {
                f64::NAN
            } else {
                pick(best, value)
            }
        }))
    }

    /// Smallest value and its offset. The first occurrence wins on ties.
    ///
    /// NaN values never compare smaller, so they are skipped unless they
    /// come first.
    pub fn min_with_index(&self) -> Result<(f64, usize)> {
        self.extremum(|candidate, best| candidate < best)
    }

    /// Largest value and its offset. The first occurrence wins on ties.
    ///
    /// NaN values never compare larger, so they are skipped unless they
    /// come first.
    pub fn max_with_index(&self) -> Result<(f64, usize)> {
        self.extremum(|candidate, best| candidate > best)
    }

    fn extremum(&self, improves: impl Fn(f64, f64) -> bool) -> Result<(f64, usize)> {
        let (&first, rest) = self.data.split_first().ok_or(MatError::EmptyCollection)?;
        let mut best = (first, 0);
        for (n, &value) in rest.iter().enumerate() {
            if improves(value, best.0) {
                best = (value, n + 1);
            }
        }
        Ok(best)
    }

    pub fn swap_rows(&mut self, row1: usize, row2: usize) -> Result<()> {
        check_position(row1, self.n_rows, "first row position")?;
        check_position(row2, self.n_rows, "second row position")?;
        for j in 0..self.n_cols {
            self.data.swap(row1 + j * self.n_rows, row2 + j * self.n_rows);
        }
        Ok(())
    }

    pub fn swap_cols(&mut self, col1: usize, col2: usize) -> Result<()> {
        check_position(col1, self.n_cols, "first column position")?;
        check_position(col2, self.n_cols, "second column position")?;
        for i in 0..self.n_rows {
            self.data.swap(i + col1 * self.n_rows, i + col2 * self.n_rows);
        }
        Ok(())
    }

    /// Transpose.
    pub fn t(&self) -> Mat {
        let mut data = Vec::with_capacity(self.n_elem());
        for i in 0..self.n_rows {
            for j in 0..self.n_cols {
                data.push(self[(i, j)]);
            }
        }
        Mat::from_parts(self.n_cols, self.n_rows, data)
    }

    /// Resolve a selection into the addressing law that walks it.
    ///
    /// Range-based selections are validated here; index lists are passed
    /// through unchecked.
    pub fn addressing<'i>(&self, selection: Selection<'i>) -> Result<Addressing<'i>> {
        let (n_rows, n_cols) = (self.n_rows, self.n_cols);
        match selection {
            Selection::All => Ok(self.block(0, n_rows, 0, n_cols)),
            Selection::Row(row) => {
                check_position(row, n_rows, "row position")?;
                Ok(self.block(row, 1, 0, n_cols))
            }
            Selection::Col(col) => {
                check_position(col, n_cols, "column position")?;
                Ok(self.block(0, n_rows, col, 1))
            }
            Selection::Rows { first, last } => {
                let (first, count) = check_range(first, last, n_rows, "row")?;
                Ok(self.block(first, count, 0, n_cols))
            }
            Selection::Cols { first, last } => {
                let (first, count) = check_range(first, last, n_cols, "column")?;
                Ok(self.block(0, n_rows, first, count))
            }
            Selection::RowSpan { row, cols } => {
                check_position(row, n_rows, "row position")?;
                let (first_col, count) = check_span(cols, n_cols, "column")?;
                Ok(self.block(row, 1, first_col, count))
            }
            Selection::ColSpan { rows, col } => {
                let (first_row, count) = check_span(rows, n_rows, "row")?;
                check_position(col, n_cols, "column position")?;
                Ok(self.block(first_row, count, col, 1))
            }
            Selection::Submat {
                first_row,
                first_col,
                last_row,
                last_col,
            } => {
                let (first_row, row_count) = check_range(first_row, last_row, n_rows, "row")?;
                let (first_col, col_count) = check_range(first_col, last_col, n_cols, "column")?;
                Ok(self.block(first_row, row_count, first_col, col_count))
            }
            Selection::SubmatSpans { rows, cols } => {
                let (first_row, row_count) = check_span(rows, n_rows, "row")?;
                let (first_col, col_count) = check_span(cols, n_cols, "column")?;
                Ok(self.block(first_row, row_count, first_col, col_count))
            }
            Selection::SubmatSize {
                first_row,
                first_col,
                size,
            } => {
                check_extent(first_row, size.n_rows, n_rows, "row")?;
                check_extent(first_col, size.n_cols, n_cols, "column")?;
                Ok(self.block(first_row, size.n_rows, first_col, size.n_cols))
            }
            Selection::Elem(indices) => Ok(Addressing::elem(indices)),
            Selection::RowsIndexed(rows) => Ok(Addressing::cross(
                n_rows,
                IndexList::Listed(rows),
                IndexList::All(n_cols),
            )),
            Selection::ColsIndexed(cols) => Ok(Addressing::cols(n_rows, cols)),
            Selection::SubmatIndexed { rows, cols } => Ok(Addressing::cross(
                n_rows,
                IndexList::Listed(rows),
                IndexList::Listed(cols),
            )),
        }
    }

    // `n_rows x n_cols` block anchored at (first_row, first_col); bounds already checked.
    fn block(&self, first_row: usize, n_rows: usize, first_col: usize, n_cols: usize) -> Addressing<'static> {
        if n_rows == 0 {
            Addressing::Rows {
                start: 0,
                n_rows: 0,
                n_cols,
                skip: 0,
            }
        } else if n_rows == 1 {
            Addressing::row(self.n_rows, first_row, first_col, n_cols)
        } else {
            Addressing::rows(self.n_rows, first_row, first_row + n_rows - 1, first_col, n_cols)
        }
    }

    /// A read-only view of `selection`.
    pub fn view<'a>(&'a self, selection: Selection<'a>) -> Result<View<'a>> {
        let addressing = self.addressing(selection)?;
        Ok(View::new(&self.data, addressing))
    }

    /// A mutable view of `selection`.
    pub fn view_mut<'a>(&'a mut self, selection: Selection<'a>) -> Result<ViewMut<'a>> {
        let addressing = self.addressing(selection)?;
        Ok(ViewMut::new(&mut self.data, addressing))
    }

    /// Copy `selection` into a new matrix of the selection's shape.
    ///
    /// # Panics
    ///
    /// Panics if an index-list selection produces a linear offset at or past
    /// `n_elem`. Out-of-range row indices that still map inside the buffer
    /// address another element instead.
    pub fn extract(&self, selection: Selection<'_>) -> Result<Mat> {
        let addressing = self.addressing(selection)?;
        match dense_range(&addressing) {
            Some(range) => Ok(Mat::from_parts(
                addressing.n_rows(),
                addressing.n_cols(),
                self.data[range].to_vec(),
            )),
            None => Ok(View::new(&self.data, addressing).to_mat()),
        }
    }

    /// Apply a unary operator (`Negate`, `Increment`, `Decrement`) in place.
    ///
    /// # Panics
    ///
    /// Panics if an index-list selection produces a linear offset at or past
    /// `n_elem`. Out-of-range row indices that still map inside the buffer
    /// address another element instead.
    pub fn apply(&mut self, selection: Selection<'_>, op: Op) -> Result<()> {
        let addressing = self.addressing(selection)?;
        match dense_range(&addressing) {
            Some(range) => {
                log::trace!("{:?} on contiguous range {:?}", op, range);
                op::apply_unary(&mut self.data, range, op)
            }
            None => ViewMut::new(&mut self.data, addressing).apply(op),
        }
    }

    /// Apply a binary operator in place against a scalar or a matrix.
    ///
    /// A matrix operand must have as many elements as the selection and is
    /// read in its own buffer order.
    ///
    /// # Panics
    ///
    /// Panics if an index-list selection produces a linear offset at or past
    /// `n_elem`. Out-of-range row indices that still map inside the buffer
    /// address another element instead.
    pub fn apply_with<'o>(
        &mut self,
        selection: Selection<'_>,
        op: Op,
        operand: impl Into<Operand<'o>>,
    ) -> Result<()> {
        let operand = operand.into();
        let addressing = self.addressing(selection)?;
        match dense_range(&addressing) {
            Some(range) => {
                if let Operand::Mat(m) = operand {
                    if m.n_elem() != range.len() {
                        return Err(MatError::SizeMismatch {
                            context: "in-place operation",
                            lhs: (addressing.n_rows(), addressing.n_cols()),
                            rhs: m.shape(),
                        });
                    }
                }
                log::trace!("{:?} on contiguous range {:?}", op, range);
                op::apply_binary(&mut self.data, range, op, operand)
            }
            None => ViewMut::new(&mut self.data, addressing).apply_with(op, operand),
        }
    }

    pub fn in_place(&mut self, op: Op) -> Result<()> {
        self.apply(Selection::All, op)
    }

    pub fn in_place_with<'o>(&mut self, op: Op, operand: impl Into<Operand<'o>>) -> Result<()> {
        self.apply_with(Selection::All, op, operand)
    }

    pub fn row(&self, row: usize) -> Result<Mat> {
        self.extract(Selection::Row(row))
    }

    pub fn col(&self, col: usize) -> Result<Mat> {
        self.extract(Selection::Col(col))
    }

    pub fn rows(&self, first: usize, last: usize) -> Result<Mat> {
        self.extract(Selection::rows(first, last))
    }

    pub fn cols(&self, first: usize, last: usize) -> Result<Mat> {
        self.extract(Selection::cols(first, last))
    }

    pub fn submat(&self, first_row: usize, first_col: usize, last_row: usize, last_col: usize) -> Result<Mat> {
        self.extract(Selection::submat(first_row, first_col, last_row, last_col))
    }

    /// Elements at the listed offsets, as a column vector.
    ///
    /// # Panics
    ///
    /// Panics if an offset is at or past `n_elem`.
    pub fn elem(&self, indices: &[f64]) -> Result<Mat> {
        self.extract(Selection::Elem(indices))
    }

    /// Exchange contents and shape with `other`.
    pub fn swap(&mut self, other: &mut Mat) {
        std::mem::swap(self, other);
    }

    fn zip_with<'o>(&self, op: Op, operand: impl Into<Operand<'o>>, context: &'static str) -> Result<Mat> {
        let operand = operand.into();
        self.check_same_shape(&operand, context)?;
        let mut out = self.clone();
        out.in_place_with(op, operand)?;
        Ok(out)
    }

    fn check_same_shape(&self, operand: &Operand<'_>, context: &'static str) -> Result<()> {
        match operand {
            Operand::Mat(m) if m.shape() != self.shape() => Err(MatError::SizeMismatch {
                context,
                lhs: self.shape(),
                rhs: m.shape(),
            }),
            _ => Ok(()),
        }
    }

    pub fn plus<'o>(&self, operand: impl Into<Operand<'o>>) -> Result<Mat> {
        self.zip_with(Op::Plus, operand, "addition")
    }

    pub fn minus<'o>(&self, operand: impl Into<Operand<'o>>) -> Result<Mat> {
        self.zip_with(Op::Minus, operand, "subtraction")
    }

    pub fn elem_times<'o>(&self, operand: impl Into<Operand<'o>>) -> Result<Mat> {
        self.zip_with(Op::ElemTimes, operand, "element-wise multiplication")
    }

    pub fn elem_divide<'o>(&self, operand: impl Into<Operand<'o>>) -> Result<Mat> {
        self.zip_with(Op::ElemDivide, operand, "element-wise division")
    }

    /// Matrix product.
    pub fn times(&self, rhs: &Mat) -> Result<Mat> {
        if self.n_cols != rhs.n_rows {
            return Err(MatError::SizeMismatch {
                context: "matrix multiplication",
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }
        let mut out = Mat::zeros(self.n_rows, rhs.n_cols);
        for j in 0..rhs.n_cols {
            for k in 0..self.n_cols {
                let factor = rhs[(k, j)];
                for i in 0..self.n_rows {
                    out.data[i + j * self.n_rows] += self.data[i + k * self.n_rows] * factor;
                }
            }
        }
        Ok(out)
    }

    /// Element-wise comparison, 1.0 where `op` holds and 0.0 elsewhere.
    pub fn compare<'o>(&self, op: Op, operand: impl Into<Operand<'o>>) -> Result<Mat> {
        let operand = operand.into();
        self.check_same_shape(&operand, "comparison")?;
        let values = op::compare(self.data.iter().copied(), op, operand)?;
        Ok(Mat::from_parts(self.n_rows, self.n_cols, values))
    }

    pub fn equal<'o>(&self, operand: impl Into<Operand<'o>>) -> Result<Mat> {
        self.compare(Op::IsEqual, operand)
    }

    pub fn non_equal<'o>(&self, operand: impl Into<Operand<'o>>) -> Result<Mat> {
        self.compare(Op::NotEqual, operand)
    }

    /// `>=` element-wise.
    pub fn greater_than<'o>(&self, operand: impl Into<Operand<'o>>) -> Result<Mat> {
        self.compare(Op::Greater, operand)
    }

    /// `<=` element-wise.
    pub fn less_than<'o>(&self, operand: impl Into<Operand<'o>>) -> Result<Mat> {
        self.compare(Op::Less, operand)
    }

    pub fn strict_greater_than<'o>(&self, operand: impl Into<Operand<'o>>) -> Result<Mat> {
        self.compare(Op::StrictGreater, operand)
    }

    pub fn strict_less_than<'o>(&self, operand: impl Into<Operand<'o>>) -> Result<Mat> {
        self.compare(Op::StrictLess, operand)
    }
}

/// The buffer range covered by `addressing` when it is contiguous.
fn dense_range(addressing: &Addressing<'_>) -> Option<Range<usize>> {
    if addressing.n_elem() == 0 {
        return match addressing {
            Addressing::Row { .. } | Addressing::Rows { .. } => Some(0..0),
            _ => None,
        };
    }
    match *addressing {
        Addressing::Rows {
            start,
            n_rows,
            n_cols,
            skip: 0,
        } => Some(start..start + n_rows * n_cols),
        Addressing::Rows {
            start,
            n_rows,
            n_cols: 1,
            ..
        } => Some(start..start + n_rows),
        Addressing::Row {
            start,
            stride,
            n_cols,
        } if stride == 1 || n_cols <= 1 => Some(start..start + n_cols),
        _ => None,
    }
}

fn check_position(position: usize, len: usize, bound: &'static str) -> Result<()> {
    if position < len {
        Ok(())
    } else {
        Err(MatError::OutOfBounds { bound, position })
    }
}

// Validate `first..=last` on an axis of length `len`; returns (first, count).
fn check_range(first: usize, last: usize, len: usize, axis: &'static str) -> Result<(usize, usize)> {
    let (first_bound, last_bound) = match axis {
        "row" => ("first row position", "last row position"),
        _ => ("first column position", "last column position"),
    };
    check_position(first, len, first_bound)?;
    check_position(last, len, last_bound)?;
    if first > last {
        return Err(MatError::InvertedRange { axis, first, last });
    }
    Ok((first, last - first + 1))
}

fn check_span(span: Span, len: usize, axis: &'static str) -> Result<(usize, usize)> {
    if span.is_entire_range {
        return Ok((0, len));
    }
    check_range(span.first, span.last, len, axis)
}

fn check_extent(first: usize, count: usize, len: usize, axis: &'static str) -> Result<()> {
    let (first_bound, last_bound) = match axis {
        "row" => ("first row position", "last row position"),
        _ => ("first column position", "last column position"),
    };
    if count == 0 {
        return if first <= len {
            Ok(())
        } else {
            Err(MatError::OutOfBounds {
                bound: first_bound,
                position: first,
            })
        };
    }
    check_position(first, len, first_bound)?;
    let last = first.checked_add(count - 1).unwrap_or(usize::MAX);
    check_position(last, len, last_bound)
}

impl Index<usize> for Mat {
    type Output = f64;

    fn index(&self, n: usize) -> &f64 {
        &self.data[n]
    }
}

impl IndexMut<usize> for Mat {
    fn index_mut(&mut self, n: usize) -> &mut f64 {
        &mut self.data[n]
    }
}

impl Index<(usize, usize)> for Mat {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(self.in_range_at(row, col), "position ({}, {}) out of bounds", row, col);
        &self.data[row + col * self.n_rows]
    }
}

impl IndexMut<(usize, usize)> for Mat {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(self.in_range_at(row, col), "position ({}, {}) out of bounds", row, col);
        &mut self.data[row + col * self.n_rows]
    }
}

impl fmt::Display for Mat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "({}, {})-matrix: [", self.n_rows, self.n_cols)?;
        for i in 0..self.n_rows {
            for j in 0..self.n_cols {
                let value = self[(i, j)];
                if value.is_infinite() {
                    let sign = if value < 0.0 { "-" } else { "" };
                    write!(f, " {:>10}", format!("{}Inf", sign))?;
                } else {
                    write!(f, " {:>10.5}", value)?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "]")
    }
}
