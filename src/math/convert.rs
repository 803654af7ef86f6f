use ndarray::Array2;

use crate::math::Mat;

impl From<&Array2<f64>> for Mat {
    fn from(array: &Array2<f64>) -> Self {
        let (n_rows, n_cols) = array.dim();
        // Iterating the transpose in logical order walks `array` column by column.
        let data: Vec<f64> = array.t().iter().copied().collect();
        Mat::from_parts(n_rows, n_cols, data)
    }
}

impl From<Array2<f64>> for Mat {
    fn from(array: Array2<f64>) -> Self {
        Mat::from(&array)
    }
}

impl Mat {
    /// Copy into an `ndarray` with the same (row, column) positions.
    pub fn to_ndarray(&self) -> Array2<f64> {
        Array2::from_shape_fn(self.shape(), |(i, j)| self[(i, j)])
    }
}
