//! Row-major sample matrices.

use pcalg_core::errors::OracleError;
use pcalg_core::VarIndex;

/// Continuous samples, `rows × cols`, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DataMatrix {
    values: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl DataMatrix {
    /// Build from one `Vec` per sample. All rows must have the same width.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, OracleError> {
        let (values, rows, cols) = flatten(rows)?;
        Ok(Self { values, rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    /// Column `col` as an iterator over rows.
    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().skip(col).step_by(self.cols.max(1)).copied()
    }

    pub(crate) fn check_variable(&self, variable: VarIndex) -> Result<(), OracleError> {
        check_variable(variable, self.cols)
    }
}

/// Categorical samples coded `0..levels[c]` per column, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscreteMatrix {
    values: Vec<usize>,
    rows: usize,
    cols: usize,
}

impl DiscreteMatrix {
    pub fn from_rows(rows: Vec<Vec<usize>>) -> Result<Self, OracleError> {
        let (values, rows, cols) = flatten(rows)?;
        Ok(Self { values, rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> usize {
        self.values[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[usize] {
        &self.values[row * self.cols..(row + 1) * self.cols]
    }

    /// Level count per column, inferred as `max + 1`. Empty columns get 0.
    pub fn inferred_levels(&self) -> Vec<usize> {
        let mut levels = vec![0; self.cols];
        for row in self.values.chunks(self.cols.max(1)) {
            for (level, &value) in levels.iter_mut().zip(row) {
                *level = (*level).max(value + 1);
            }
        }
        levels
    }

    /// Every value must lie below its column's level count.
    pub fn check_levels(&self, levels: &[usize]) -> Result<(), OracleError> {
        if levels.len() != self.cols {
            return Err(OracleError::DimensionMismatch {
                details: format!("{} level counts for {} columns", levels.len(), self.cols),
            });
        }
        for row in self.values.chunks(self.cols.max(1)) {
            for (column, (&value, &limit)) in row.iter().zip(levels).enumerate() {
                if value >= limit {
                    return Err(OracleError::InvalidValue {
                        column,
                        value,
                        levels: limit,
                    });
                }
            }
        }
        Ok(())
    }

    pub(crate) fn check_variable(&self, variable: VarIndex) -> Result<(), OracleError> {
        check_variable(variable, self.cols)
    }
}

fn check_variable(variable: VarIndex, columns: usize) -> Result<(), OracleError> {
    if variable < columns {
        Ok(())
    } else {
        Err(OracleError::VariableOutOfRange { variable, columns })
    }
}

fn flatten<T: Copy>(rows: Vec<Vec<T>>) -> Result<(Vec<T>, usize, usize), OracleError> {
    let cols = rows.first().map_or(0, Vec::len);
    let mut values = Vec::with_capacity(rows.len() * cols);
    for (index, row) in rows.iter().enumerate() {
        if row.len() != cols {
            return Err(OracleError::DimensionMismatch {
                details: format!("row {index} has {} columns, expected {cols}", row.len()),
            });
        }
        values.extend_from_slice(row);
    }
    Ok((values, rows.len(), cols))
}
