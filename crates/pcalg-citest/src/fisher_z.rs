//! Fisher-z test for Gaussian data.
//!
//! The partial correlation of `x, y | S` is read off the inverse of the
//! correlation submatrix over `[x, y, S]`, then transformed by Fisher's z.
//! Under the null hypothesis `z · sqrt(n − |S| − 3)` is standard normal.

use pcalg_core::constants::DEFAULT_ALPHA;
use pcalg_core::errors::OracleError;
use pcalg_core::{Decision, IndependenceOracle, VarIndex};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use crate::data::DataMatrix;
use crate::linalg::SquareMatrix;

/// Partial correlations are clamped this far inside `(-1, 1)`.
const CORRELATION_CLAMP: f64 = 1e-12;

pub struct FisherZTest {
    correlation: SquareMatrix,
    rows: usize,
    cols: usize,
    alpha: f64,
    normal: Normal,
}

impl FisherZTest {
    /// Precompute the Pearson correlation matrix of `data`.
    pub fn new(data: &DataMatrix, alpha: f64) -> Result<Self, OracleError> {
        let normal = Normal::new(0.0, 1.0).map_err(|e| OracleError::Failed {
            reason: e.to_string(),
        })?;
        Ok(Self {
            correlation: correlation_matrix(data),
            rows: data.rows(),
            cols: data.cols(),
            alpha,
            normal,
        })
    }

    /// Same as [`FisherZTest::new`] at `DEFAULT_ALPHA`.
    pub fn with_default_alpha(data: &DataMatrix) -> Result<Self, OracleError> {
        Self::new(data, DEFAULT_ALPHA)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Sample correlation between two columns.
    pub fn correlation(&self, x: VarIndex, y: VarIndex) -> f64 {
        self.correlation.get(x, y)
    }

    /// Partial correlation of `x` and `y` given `given`.
    pub fn partial_correlation(
        &self,
        x: VarIndex,
        y: VarIndex,
        given: &[VarIndex],
    ) -> Result<f64, OracleError> {
        for &v in [x, y].iter().chain(given) {
            if v >= self.cols {
                return Err(OracleError::VariableOutOfRange {
                    variable: v,
                    columns: self.cols,
                });
            }
        }
        let singular = || OracleError::SingularMatrix {
            x,
            y,
            given: given.to_vec(),
        };

        if given.is_empty() {
            let r = self.correlation.get(x, y);
            return if r.is_finite() { Ok(r) } else { Err(singular()) };
        }

        let index: Vec<VarIndex> = [x, y].into_iter().chain(given.iter().copied()).collect();
        let sub =
            SquareMatrix::from_fn(index.len(), |r, c| self.correlation.get(index[r], index[c]));
        let precision = sub.inverse().ok_or_else(singular)?;
        let denominator = (precision.get(0, 0) * precision.get(1, 1)).sqrt();
        if !denominator.is_finite() || denominator <= 0.0 {
            return Err(singular());
        }
        Ok(-precision.get(0, 1) / denominator)
    }

    /// Two-sided p-value of `x ⟂ y | given`.
    pub fn p_value(&self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> Result<f64, OracleError> {
        let required = given.len() + 4;
        if self.rows < required {
            return Err(OracleError::InsufficientSamples {
                rows: self.rows,
                required,
            });
        }
        let limit = 1.0 - CORRELATION_CLAMP;
        let r = self.partial_correlation(x, y, given)?.clamp(-limit, limit);
        let z = 0.5 * ((1.0 + r) / (1.0 - r)).ln();
        let statistic = z.abs() * ((self.rows - given.len() - 3) as f64).sqrt();
        let p = 2.0 * (1.0 - self.normal.cdf(statistic));
        debug!(x, y, given = ?given, r, statistic, p, "fisher-z");
        Ok(p.clamp(0.0, 1.0))
    }
}

impl IndependenceOracle for FisherZTest {
    fn test(&self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> Result<Decision, OracleError> {
        let p = self.p_value(x, y, given)?;
        Ok(Decision::from_p_value(p, self.alpha))
    }

    fn name(&self) -> &str {
        "fisher-z"
    }
}

fn correlation_matrix(data: &DataMatrix) -> SquareMatrix {
    let rows = data.rows() as f64;
    let cols = data.cols();
    let means: Vec<f64> = (0..cols).map(|c| data.column(c).sum::<f64>() / rows).collect();
    let mut covariance = vec![0.0; cols * cols];
    for row in 0..data.rows() {
        for a in 0..cols {
            let da = data.get(row, a) - means[a];
            for b in a..cols {
                covariance[a * cols + b] += da * (data.get(row, b) - means[b]);
            }
        }
    }
    SquareMatrix::from_fn(cols, |a, b| {
        let (lo, hi) = (a.min(b), a.max(b));
        let scale = (covariance[a * cols + a] * covariance[b * cols + b]).sqrt();
        if a == b {
            1.0
        } else {
            covariance[lo * cols + hi] / scale
        }
    })
}
