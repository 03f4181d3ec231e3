//! G-square likelihood-ratio tests for categorical data.
//!
//! Rows are bucketed by the observed configuration of the conditioning set;
//! each bucket holds an `lx × ly` contingency table. Empty cells contribute
//! nothing to the statistic.

use pcalg_core::constants::{DEFAULT_ALPHA, MIN_ROWS_PER_DOF};
use pcalg_core::errors::OracleError;
use pcalg_core::{Decision, IndependenceOracle, VarIndex};
use rustc_hash::FxHashMap;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::{debug, warn};

use crate::data::DiscreteMatrix;

/// Contingency counts `n_xyk`, one `lx × ly` table per observed stratum `k`.
struct Contingency {
    lx: usize,
    ly: usize,
    strata: Vec<Vec<f64>>,
}

impl Contingency {
    fn count(
        data: &DiscreteMatrix,
        x: VarIndex,
        y: VarIndex,
        given: &[VarIndex],
        lx: usize,
        ly: usize,
    ) -> Self {
        let mut stratum_of: FxHashMap<Vec<usize>, usize> = FxHashMap::default();
        let mut strata: Vec<Vec<f64>> = Vec::new();
        for r in 0..data.rows() {
            let row = data.row(r);
            let key: Vec<usize> = given.iter().map(|&s| row[s]).collect();
            let k = *stratum_of.entry(key).or_insert_with(|| {
                strata.push(vec![0.0; lx * ly]);
                strata.len() - 1
            });
            strata[k][row[x] * ly + row[y]] += 1.0;
        }
        Self { lx, ly, strata }
    }

    /// `G² = Σ 2·n_xyk·ln(n_xyk·n_k / (n_xk·n_yk))`.
    fn statistic(&self) -> f64 {
        let mut g2 = 0.0;
        for table in &self.strata {
            let n_k: f64 = table.iter().sum();
            let n_xk: Vec<f64> = (0..self.lx)
                .map(|i| table[i * self.ly..(i + 1) * self.ly].iter().sum())
                .collect();
            let n_yk: Vec<f64> = (0..self.ly)
                .map(|j| (0..self.lx).map(|i| table[i * self.ly + j]).sum())
                .collect();
            for i in 0..self.lx {
                for j in 0..self.ly {
                    let n = table[i * self.ly + j];
                    if n > 0.0 {
                        g2 += 2.0 * n * (n * n_k / (n_xk[i] * n_yk[j])).ln();
                    }
                }
            }
        }
        g2
    }
}

fn chi_square_sf(statistic: f64, dof: usize) -> Result<f64, OracleError> {
    let distribution = ChiSquared::new(dof as f64).map_err(|e| OracleError::Failed {
        reason: e.to_string(),
    })?;
    Ok(distribution.sf(statistic.max(0.0)))
}

fn check_variables(
    data: &DiscreteMatrix,
    x: VarIndex,
    y: VarIndex,
    given: &[VarIndex],
) -> Result<(), OracleError> {
    for &v in [x, y].iter().chain(given) {
        data.check_variable(v)?;
    }
    Ok(())
}

/// G-square test for 0/1 data with `2^|S|` degrees of freedom.
pub struct BinaryGSquareTest {
    data: DiscreteMatrix,
    alpha: f64,
}

impl BinaryGSquareTest {
    /// Every value in `data` must be 0 or 1.
    pub fn new(data: &DiscreteMatrix, alpha: f64) -> Result<Self, OracleError> {
        data.check_levels(&vec![2; data.cols()])?;
        Ok(Self {
            data: data.clone(),
            alpha,
        })
    }

    pub fn with_default_alpha(data: &DiscreteMatrix) -> Result<Self, OracleError> {
        Self::new(data, DEFAULT_ALPHA)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Fails with `InsufficientSamples` when there are fewer than ten rows per
    /// degree of freedom.
    pub fn p_value(&self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> Result<f64, OracleError> {
        check_variables(&self.data, x, y, given)?;
        let dof = u32::try_from(given.len())
            .ok()
            .and_then(|bits| 2usize.checked_pow(bits))
            .unwrap_or(usize::MAX);
        let required = dof.saturating_mul(MIN_ROWS_PER_DOF);
        if self.data.rows() < required {
            return Err(OracleError::InsufficientSamples {
                rows: self.data.rows(),
                required,
            });
        }
        let g2 = Contingency::count(&self.data, x, y, given, 2, 2).statistic();
        let p = chi_square_sf(g2, dof)?;
        debug!(x, y, given = ?given, dof, g2, p, "binary g-square");
        Ok(p)
    }
}

impl IndependenceOracle for BinaryGSquareTest {
    fn test(&self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> Result<Decision, OracleError> {
        Ok(Decision::from_p_value(self.p_value(x, y, given)?, self.alpha))
    }

    fn name(&self) -> &str {
        "g-square-binary"
    }
}

/// G-square test for categorical data with per-column level counts.
pub struct DiscreteGSquareTest {
    data: DiscreteMatrix,
    levels: Vec<usize>,
    alpha: f64,
}

impl DiscreteGSquareTest {
    /// `levels[c]` is the number of categories of column `c`; values must lie
    /// in `0..levels[c]`.
    pub fn new(data: &DiscreteMatrix, levels: &[usize], alpha: f64) -> Result<Self, OracleError> {
        data.check_levels(levels)?;
        Ok(Self {
            data: data.clone(),
            levels: levels.to_vec(),
            alpha,
        })
    }

    /// Levels inferred from the data as `max + 1` per column.
    pub fn with_inferred_levels(data: &DiscreteMatrix, alpha: f64) -> Result<Self, OracleError> {
        Self::new(data, &data.inferred_levels(), alpha)
    }

    /// Inferred levels at `DEFAULT_ALPHA`.
    pub fn with_default_alpha(data: &DiscreteMatrix) -> Result<Self, OracleError> {
        Self::with_inferred_levels(data, DEFAULT_ALPHA)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    /// `(lx − 1)(ly − 1)·∏ levels(S)`, saturating.
    pub fn degrees_of_freedom(&self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> usize {
        let base = self.levels[x].saturating_sub(1) * self.levels[y].saturating_sub(1);
        given
            .iter()
            .fold(base, |dof, &s| dof.saturating_mul(self.levels[s]))
    }

    /// Too few rows per degree of freedom yields `p = 1` with a warning.
    pub fn p_value(&self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> Result<f64, OracleError> {
        check_variables(&self.data, x, y, given)?;
        let dof = self.degrees_of_freedom(x, y, given);
        let required = dof.saturating_mul(MIN_ROWS_PER_DOF);
        if dof == 0 || self.data.rows() < required {
            warn!(
                x,
                y,
                given = ?given,
                rows = self.data.rows(),
                required,
                "not enough samples for g-square, assuming independence"
            );
            return Ok(1.0);
        }
        let g2 =
            Contingency::count(&self.data, x, y, given, self.levels[x], self.levels[y]).statistic();
        let p = chi_square_sf(g2, dof)?;
        debug!(x, y, given = ?given, dof, g2, p, "discrete g-square");
        Ok(p)
    }
}

impl IndependenceOracle for DiscreteGSquareTest {
    fn test(&self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> Result<Decision, OracleError> {
        Ok(Decision::from_p_value(self.p_value(x, y, given)?, self.alpha))
    }

    fn name(&self) -> &str {
        "g-square-discrete"
    }
}
