use ndarray::Array2;
use ndarray::ArrayView2;

/// Fixed display orientation shared by all three planes: a 90° clockwise
/// rotation of the raw slice.
///
/// Displayed arrays are indexed `[display_x, display_y]`. A raw slice of
/// shape `(R, C)` becomes a displayed slice of shape `(C, R)` with
/// `displayed[i, j] = raw[R - 1 - j, i]`.
pub struct DisplayTransform;

impl DisplayTransform {
    pub fn display_shape(raw_shape: (usize, usize)) -> (usize, usize) {
        (raw_shape.1, raw_shape.0)
    }

    pub fn apply<T: Clone>(raw: &ArrayView2<'_, T>) -> Array2<T> {
        let (rows, cols) = raw.dim();
        Array2::from_shape_fn((cols, rows), |(i, j)| raw[[rows - 1 - j, i]].clone())
    }

    /// Maps a raw `(row, column)` to the displayed `(x, y)` it lands on.
    #[inline]
    pub fn forward(raw_point: (usize, usize), raw_shape: (usize, usize)) -> (usize, usize) {
        let (row, col) = raw_point;
        (col, raw_shape.0 - 1 - row)
    }

    /// Exact inverse of [`DisplayTransform::forward`].
    ///
    /// Works in signed space so points off the canvas come back as raw
    /// coordinates outside the slice instead of wrapping.
    #[inline]
    pub fn inverse(display_point: (i64, i64), raw_shape: (usize, usize)) -> (i64, i64) {
        let (x, y) = display_point;
        (raw_shape.0 as i64 - 1 - y, x)
    }
}
