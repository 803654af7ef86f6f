//! Operator tags and the single dispatch point that applies them to a
//! sequence of physical offsets.
//!
//! Every in-place operation in the crate, whether it targets the whole buffer
//! or a view, ends up in [`apply_unary`] or [`apply_binary`]. Comparison
//! producers go through [`compare`] and never write to the source buffer.

use crate::error::{MatError, Result};
use crate::math::Mat;

/// The closed set of operators understood by the dispatch functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    /// Assignment (`=`).
    Equal,
    Plus,
    Minus,
    ElemTimes,
    ElemDivide,
    Negate,
    Increment,
    Decrement,
    /// `==`, producing 0.0/1.0.
    IsEqual,
    /// `!=`, producing 0.0/1.0.
    NotEqual,
    /// `>=`, producing 0.0/1.0.
    Greater,
    /// `<=`, producing 0.0/1.0.
    Less,
    /// `>`, producing 0.0/1.0.
    StrictGreater,
    /// `<`, producing 0.0/1.0.
    StrictLess,
}

impl Op {
    pub fn is_unary(self) -> bool {
        matches!(self, Op::Negate | Op::Increment | Op::Decrement)
    }

    pub fn is_comparison(self) -> bool {
        self.predicate().is_some()
    }

    fn predicate(self) -> Option<fn(f64, f64) -> bool> {
        let pred: fn(f64, f64) -> bool = match self {
            Op::IsEqual => |x, y| x == y,
            Op::NotEqual => |x, y| x != y,
            Op::Greater => |x, y| x >= y,
            Op::Less => |x, y| x <= y,
            Op::StrictGreater => |x, y| x > y,
            Op::StrictLess => |x, y| x < y,
            _ => return None,
        };
        Some(pred)
    }
}

/// Right-hand side of a binary operation.
///
/// A matrix operand is consumed in its own buffer order, paired one-to-one
/// with the offsets of the target.
#[derive(Clone, Copy, Debug)]
pub enum Operand<'a> {
    Scalar(f64),
    Mat(&'a Mat),
}

impl Operand<'_> {
    /// Number of values the operand contributes, `None` for a broadcast scalar.
    pub fn n_elem(&self) -> Option<usize> {
        match self {
            Operand::Scalar(_) => None,
            Operand::Mat(m) => Some(m.n_elem()),
        }
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl<'a> From<&'a Mat> for Operand<'a> {
    fn from(value: &'a Mat) -> Self {
        Operand::Mat(value)
    }
}

pub(crate) fn apply_unary<I>(data: &mut [f64], offsets: I, op: Op) -> Result<()>
where
    I: IntoIterator<Item = usize>,
{
    let f: fn(f64) -> f64 = match op {
        Op::Negate => |x| -x,
        Op::Increment => |x| x + 1.0,
        Op::Decrement => |x| x - 1.0,
        _ => return Err(MatError::UnsupportedOperation(op)),
    };
    log::trace!("applying unary {:?}", op);

    for n in offsets {
        data[n] = f(data[n]);
    }
    Ok(())
}

pub(crate) fn apply_binary<I>(data: &mut [f64], offsets: I, op: Op, operand: Operand<'_>) -> Result<()>
where
    I: IntoIterator<Item = usize>,
{
    let f: fn(f64, f64) -> f64 = match op {
        Op::Equal => |_, y| y,
        Op::Plus => |x, y| x + y,
        Op::Minus => |x, y| x - y,
        Op::ElemTimes => |x, y| x * y,
        Op::ElemDivide => |x, y| x / y,
        _ => return Err(MatError::UnsupportedOperation(op)),
    };
    log::trace!("applying binary {:?} with {:?} operand", op, operand.n_elem());

    match operand {
        Operand::Scalar(y) => {
            for n in offsets {
                data[n] = f(data[n], y);
            }
        }
        Operand::Mat(m) => {
            for (n, &y) in offsets.into_iter().zip(m.as_slice()) {
                data[n] = f(data[n], y);
            }
        }
    }
    Ok(())
}

/// Evaluate a comparison over `values`, producing 1.0 where it holds and 0.0
/// elsewhere.
pub(crate) fn compare<I>(values: I, op: Op, operand: Operand<'_>) -> Result<Vec<f64>>
where
    I: IntoIterator<Item = f64>,
{
    let pred = op.predicate().ok_or(MatError::UnsupportedOperation(op))?;
    let indicator = |hit: bool| if hit { 1.0 } else { 0.0 };

    let out = match operand {
        Operand::Scalar(y) => values.into_iter().map(|x| indicator(pred(x, y))).collect(),
        Operand::Mat(m) => values
            .into_iter()
            .zip(m.as_slice())
            .map(|(x, &y)| indicator(pred(x, y)))
            .collect(),
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unary_ops_touch_only_listed_offsets() {
        let mut data = vec![1.0, 2.0, 3.0, 4.0];
        apply_unary(&mut data, [0, 2], Op::Negate).unwrap();
        assert_eq!(data, vec![-1.0, 2.0, -3.0, 4.0]);

        apply_unary(&mut data, 0..4, Op::Increment).unwrap();
        assert_eq!(data, vec![0.0, 3.0, -2.0, 5.0]);

        apply_unary(&mut data, [3, 3], Op::Decrement).unwrap();
        assert_eq!(data, vec![0.0, 3.0, -2.0, 3.0]);
    }

    #[test]
    fn binary_ops_with_scalar() {
        let mut data = vec![2.0, 4.0, 8.0];
        apply_binary(&mut data, 0..3, Op::Plus, Operand::Scalar(1.0)).unwrap();
        assert_eq!(data, vec![3.0, 5.0, 9.0]);
        apply_binary(&mut data, 0..3, Op::Minus, Operand::Scalar(1.0)).unwrap();
        apply_binary(&mut data, 0..3, Op::ElemTimes, Operand::Scalar(0.5)).unwrap();
        assert_eq!(data, vec![1.0, 2.0, 4.0]);
        apply_binary(&mut data, [1], Op::ElemDivide, Operand::Scalar(4.0)).unwrap();
        apply_binary(&mut data, [2], Op::Equal, Operand::Scalar(-7.0)).unwrap();
        assert_eq!(data, vec![1.0, 0.5, -7.0]);
    }

    #[test]
    fn matrix_operand_is_consumed_in_offset_order() {
        let rhs = Mat::from_col_major(3, 1, vec![10.0, 20.0, 30.0]).unwrap();
        let mut data = vec![0.0; 4];
        apply_binary(&mut data, [3, 0, 1], Op::Plus, Operand::Mat(&rhs)).unwrap();
        assert_eq!(data, vec![20.0, 30.0, 0.0, 10.0]);
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let mut data = vec![1.0];
        assert!(matches!(
            apply_unary(&mut data, 0..1, Op::Plus),
            Err(MatError::UnsupportedOperation(Op::Plus))
        ));
        assert!(matches!(
            apply_binary(&mut data, 0..1, Op::Negate, Operand::Scalar(1.0)),
            Err(MatError::UnsupportedOperation(Op::Negate))
        ));
        assert!(compare(vec![1.0], Op::Plus, Operand::Scalar(1.0)).is_err());
        assert_eq!(data, vec![1.0]);
    }

    #[test]
    fn comparisons_follow_inclusive_and_strict_semantics() {
        let values = [1.0, 2.0, 3.0, f64::NAN];
        let run = |op| compare(values, op, Operand::Scalar(2.0)).unwrap();
        assert_eq!(run(Op::IsEqual), vec![0.0, 1.0, 0.0, 0.0]);
        assert_eq!(run(Op::NotEqual), vec![1.0, 0.0, 1.0, 1.0]);
        assert_eq!(run(Op::Greater), vec![0.0, 1.0, 1.0, 0.0]);
        assert_eq!(run(Op::Less), vec![1.0, 1.0, 0.0, 0.0]);
        assert_eq!(run(Op::StrictGreater), vec![0.0, 0.0, 1.0, 0.0]);
        assert_eq!(run(Op::StrictLess), vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn op_classification() {
        assert!(Op::Negate.is_unary());
        assert!(!Op::Plus.is_unary());
        assert!(Op::StrictLess.is_comparison());
        assert!(!Op::Equal.is_comparison());
    }
}
