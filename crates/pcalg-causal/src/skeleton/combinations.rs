//! Fixed-size subsets of a sorted pool, in lexicographic order.

use pcalg_core::{ConditioningSet, VarIndex};

/// Yields every `size`-subset of `pool`. For a sorted pool the subsets come
/// out sorted and in lexicographic order, smallest indices first.
pub struct Combinations<'a> {
    pool: &'a [VarIndex],
    indices: Vec<usize>,
    done: bool,
}

impl<'a> Combinations<'a> {
    pub fn new(pool: &'a [VarIndex], size: usize) -> Self {
        Self {
            pool,
            indices: (0..size).collect(),
            done: size > pool.len(),
        }
    }
}

impl Iterator for Combinations<'_> {
    type Item = ConditioningSet;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current: ConditioningSet = self.indices.iter().map(|&p| self.pool[p]).collect();

        let n = self.pool.len();
        let k = self.indices.len();
        match (0..k).rev().find(|&i| self.indices[i] != i + n - k) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(current)
    }
}
