//! Small dense linear algebra for correlation submatrices.

/// Pivots smaller than this are treated as zero.
const PIVOT_EPSILON: f64 = 1e-12;

/// Square matrix stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SquareMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SquareMatrix {
    pub(crate) fn from_fn(size: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let values = (0..size * size).map(|k| f(k / size, k % size)).collect();
        Self { size, values }
    }

    pub(crate) fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.size + col]
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for col in 0..self.size {
            self.values.swap(a * self.size + col, b * self.size + col);
        }
    }

    /// Gauss-Jordan inverse with partial pivoting. `None` when singular.
    pub(crate) fn inverse(&self) -> Option<SquareMatrix> {
        let n = self.size;
        let mut work = self.clone();
        let mut inverse = SquareMatrix::from_fn(n, |r, c| if r == c { 1.0 } else { 0.0 });

        for col in 0..n {
            let pivot_row = (col..n).max_by(|&a, &b| {
                work.get(a, col).abs().total_cmp(&work.get(b, col).abs())
            })?;
            let pivot = work.get(pivot_row, col);
            if !pivot.is_finite() || pivot.abs() < PIVOT_EPSILON {
                return None;
            }
            work.swap_rows(col, pivot_row);
            inverse.swap_rows(col, pivot_row);

            for k in 0..n {
                work.values[col * n + k] /= pivot;
                inverse.values[col * n + k] /= pivot;
            }
            for row in (0..n).filter(|&r| r != col) {
                let factor = work.get(row, col);
                if factor == 0.0 {
                    continue;
                }
                for k in 0..n {
                    let (w, v) = (work.get(col, k), inverse.get(col, k));
                    work.values[row * n + k] -= factor * w;
                    inverse.values[row * n + k] -= factor * v;
                }
            }
        }
        Some(inverse)
    }
}
