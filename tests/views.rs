//! Integration tests for views: addressing laws seen through the facade,
//! index-list writes and in-place operators applied through `ViewMut`.

use redeem_matrix::math::{Addressing, IndexList, ViewMut};
use redeem_matrix::{Mat, Op, Selection, Span};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 3x4 matrix whose buffer holds 0..12 in column-major order.
fn counting(n_rows: usize, n_cols: usize) -> Mat {
    Mat::from_col_major(n_rows, n_cols, (0..n_rows * n_cols).map(|v| v as f64).collect()).unwrap()
}

// ---------------------------------------------------------------------------
// Reading through views
// ---------------------------------------------------------------------------

#[test]
fn row_range_view_matches_direct_indexing() {
    init_logger();
    let m = counting(5, 3);
    let view = m.view(Selection::rows(1, 3)).unwrap();
    assert_eq!((view.n_rows(), view.n_cols()), (3, 3));

    let mut expected = Vec::new();
    for j in 0..3 {
        for i in 1..=3 {
            expected.push(m.as_slice()[i + j * 5]);
        }
    }
    assert_eq!(view.iter().collect::<Vec<_>>(), expected);
}

#[test]
fn single_row_view_strides_by_height() {
    let m = counting(3, 4);
    let view = m.view(Selection::Row(2)).unwrap();
    assert_eq!(view.iter().collect::<Vec<_>>(), vec![2.0, 5.0, 8.0, 11.0]);
    assert!(!view.is_col());
}

#[test]
fn span_views_cover_part_of_a_row_or_column() {
    let m = counting(3, 4);
    let row_part = m
        .view(Selection::RowSpan {
            row: 1,
            cols: Span::new(1, 2),
        })
        .unwrap();
    assert_eq!(row_part.iter().collect::<Vec<_>>(), vec![4.0, 7.0]);

    let col_part = m
        .view(Selection::ColSpan {
            rows: Span::new(1, 2),
            col: 3,
        })
        .unwrap();
    assert_eq!(col_part.iter().collect::<Vec<_>>(), vec![10.0, 11.0]);
    assert!(col_part.is_col());
}

#[test]
fn indexed_selections_follow_the_lists() {
    let m = counting(3, 4);

    let cols = [3.0, 1.0];
    let view = m.view(Selection::ColsIndexed(&cols)).unwrap();
    assert_eq!(view.iter().collect::<Vec<_>>(), vec![9.0, 10.0, 11.0, 3.0, 4.0, 5.0]);

    let rows = [2.0, 0.0];
    let view = m.view(Selection::RowsIndexed(&rows)).unwrap();
    assert_eq!((view.n_rows(), view.n_cols()), (2, 4));
    assert_eq!(view.iter().collect::<Vec<_>>(), vec![2.0, 0.0, 5.0, 3.0, 8.0, 6.0, 11.0, 9.0]);

    let sub = m
        .view(Selection::SubmatIndexed {
            rows: &[1.0],
            cols: &[0.0, 2.0],
        })
        .unwrap();
    assert_eq!(sub.iter().collect::<Vec<_>>(), vec![1.0, 7.0]);
}

#[test]
fn view_comparison_produces_indicator_matrix() {
    let m = counting(2, 3);
    let view = m.view(Selection::Row(1)).unwrap();
    let hits = view.compare(Op::StrictGreater, 2.0).unwrap();
    assert_eq!(hits.shape(), (1, 3));
    assert_eq!(hits.as_slice(), &[0.0, 1.0, 1.0]);
}

// ---------------------------------------------------------------------------
// Writing through views
// ---------------------------------------------------------------------------

#[test]
fn element_index_assignment_hits_listed_offsets_only() {
    let mut m = Mat::zeros(4, 1);
    m.apply_with(Selection::Elem(&[2.0, 0.0, 2.0]), Op::Equal, 5.0).unwrap();
    assert_eq!(m.as_slice(), &[5.0, 0.0, 5.0, 0.0]);
}

#[test]
fn later_duplicate_indices_win() {
    let mut m = Mat::zeros(4, 1);
    let values = Mat::col_vec(vec![1.0, 2.0, 3.0, 4.0]);
    m.apply_with(Selection::Elem(&[3.0, 1.0, 3.0, 0.0]), Op::Equal, &values).unwrap();
    assert_eq!(m.as_slice(), &[4.0, 2.0, 0.0, 3.0]);
}

#[test]
fn view_mut_applies_unary_operators() {
    let mut m = counting(3, 3);
    {
        let mut view = m.view_mut(Selection::submat(1, 1, 2, 2)).unwrap();
        view.apply(Op::Negate).unwrap();
        view.apply(Op::Increment).unwrap();
    }
    assert_eq!(m.as_slice(), &[0.0, 1.0, 2.0, 3.0, -3.0, -4.0, 6.0, -6.0, -7.0]);
}

#[test]
fn view_over_raw_buffer() {
    let mut data = vec![1.0; 6];
    let ridx = [1.0];
    let mut view = ViewMut::new(&mut data, Addressing::cross(2, IndexList::Listed(&ridx), IndexList::All(3)));
    view.apply_with(Op::ElemTimes, 4.0).unwrap();
    assert_eq!(data, vec![1.0, 4.0, 1.0, 4.0, 1.0, 4.0]);
}

#[test]
fn view_operand_size_is_checked() {
    let mut m = counting(3, 3);
    let wrong = Mat::ones(2, 2);
    let mut view = m.view_mut(Selection::Col(0)).unwrap();
    assert!(view.apply_with(Op::Plus, &wrong).is_err());
}

#[test]
#[should_panic]
fn out_of_range_element_index_panics() {
    let mut m = Mat::zeros(2, 2);
    let _ = m.apply(Selection::Elem(&[1.0, 7.0]), Op::Negate);
}

#[test]
fn row_index_past_height_lands_in_next_column() {
    // linear offset 4 + 0 * 3 stays inside the buffer, at (1, 1)
    let mut m = Mat::zeros(3, 3);
    m.apply_with(
        Selection::SubmatIndexed {
            rows: &[4.0],
            cols: &[0.0],
        },
        Op::Equal,
        9.0,
    )
    .unwrap();
    assert_eq!(m.as_slice(), &[0.0, 0.0, 0.0, 0.0, 9.0, 0.0, 0.0, 0.0, 0.0]);
    assert_eq!(m[(1, 1)], 9.0);

    let read = m
        .extract(Selection::SubmatIndexed {
            rows: &[4.0],
            cols: &[0.0],
        })
        .unwrap();
    assert_eq!(read.shape(), (1, 1));
    assert_eq!(read[0], 9.0);
}

#[test]
#[should_panic]
fn row_index_past_buffer_panics() {
    let mut m = Mat::zeros(3, 3);
    let _ = m.apply(
        Selection::SubmatIndexed {
            rows: &[4.0],
            cols: &[2.0],
        },
        Op::Negate,
    );
}

#[test]
#[should_panic]
fn negative_column_index_panics() {
    let m = Mat::zeros(2, 2);
    let _ = m.extract(Selection::ColsIndexed(&[-1.0]));
}
