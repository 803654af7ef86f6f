use std::io;
use std::path::PathBuf;

use crate::math::Op;

pub type Result<T> = std::result::Result<T, MatError>;

/// Errors raised by matrix construction, selection, dispatch and text I/O.
#[derive(Debug, thiserror::Error)]
pub enum MatError {
    #[error("the {bound} ({position}) is out of bounds")]
    OutOfBounds { bound: &'static str, position: usize },

    #[error("the first {axis} position ({first}) is larger than the last {axis} position ({last})")]
    InvertedRange {
        axis: &'static str,
        first: usize,
        last: usize,
    },

    #[error("the matrix must have at least one element")]
    EmptyCollection,

    #[error("invalid shape ({n_rows}, {n_cols}) for buffer of length {len}")]
    Shape {
        n_rows: usize,
        n_cols: usize,
        len: usize,
    },

    #[error("{context}: left-hand side has shape {lhs:?} but right-hand side has shape {rhs:?}")]
    SizeMismatch {
        context: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error("ragged input: line {line} has {found} values, expected {expected}")]
    RaggedInput {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: cannot parse '{token}' as a number")]
    Parse { line: usize, token: String },

    #[error("internal error: unsupported operation {0:?}")]
    UnsupportedOperation(Op),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("I/O error on {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
