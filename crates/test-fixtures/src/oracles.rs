//! Oracles with known answers.

use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use pcalg_core::errors::OracleError;
use pcalg_core::{Decision, IndependenceOracle, VarIndex};

use crate::dag::TrueDag;

fn normalized(x: VarIndex, y: VarIndex, given: &[VarIndex]) -> (VarIndex, VarIndex, Vec<VarIndex>) {
    let mut given = given.to_vec();
    given.sort_unstable();
    (x.min(y), x.max(y), given)
}

/// Perfect oracle: answers by d-separation in a known DAG and records every query.
pub struct DagOracle {
    dag: TrueDag,
    calls: Mutex<Vec<(VarIndex, VarIndex, Vec<VarIndex>)>>,
}

impl DagOracle {
    pub fn new(dag: TrueDag) -> Self {
        Self {
            dag,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn dag(&self) -> &TrueDag {
        &self.dag
    }

    pub fn calls(&self) -> Vec<(VarIndex, VarIndex, Vec<VarIndex>)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

impl IndependenceOracle for DagOracle {
    fn test(&self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> Result<Decision, OracleError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((x, y, given.to_vec()));
        }
        Ok(if self.dag.d_separated(x, y, given) {
            Decision::Independent
        } else {
            Decision::Dependent
        })
    }

    fn name(&self) -> &str {
        "d-separation"
    }
}

/// Reports independence exactly for the listed `(x, y, given)` triples,
/// regardless of argument order. Everything else is dependent.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    independent: HashSet<(VarIndex, VarIndex, Vec<VarIndex>)>,
    calls: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn independent(mut self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> Self {
        self.independent.insert(normalized(x, y, given));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl IndependenceOracle for ScriptedOracle {
    fn test(&self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> Result<Decision, OracleError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(if self.independent.contains(&normalized(x, y, given)) {
            Decision::Independent
        } else {
            Decision::Dependent
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Deterministic pseudo-random answers that depend only on the unordered pair
/// and the conditioning set, never on argument order.
///
/// Such answers are usually not faithful to any DAG, which makes this oracle
/// useful for exercising order-independence and error paths.
#[derive(Debug, Clone)]
pub struct HashedOracle {
    seed: u64,
    independence_rate: f64,
}

impl HashedOracle {
    pub fn new(seed: u64, independence_rate: f64) -> Self {
        Self {
            seed,
            independence_rate,
        }
    }
}

impl IndependenceOracle for HashedOracle {
    fn test(&self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> Result<Decision, OracleError> {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        normalized(x, y, given).hash(&mut hasher);
        let draw = (hasher.finish() % 10_000) as f64 / 10_000.0;
        Ok(if draw < self.independence_rate {
            Decision::Independent
        } else {
            Decision::Dependent
        })
    }

    fn name(&self) -> &str {
        "hashed"
    }
}

/// Relabels variables before delegating: variable `v` of this oracle is
/// variable `relabel[v]` of the inner one.
pub struct PermutedOracle<O> {
    inner: O,
    relabel: Vec<VarIndex>,
}

impl<O> PermutedOracle<O> {
    pub fn new(inner: O, relabel: Vec<VarIndex>) -> Self {
        Self { inner, relabel }
    }
}

impl<O: IndependenceOracle> IndependenceOracle for PermutedOracle<O> {
    fn test(&self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> Result<Decision, OracleError> {
        let mut mapped: Vec<VarIndex> = given.iter().map(|&v| self.relabel[v]).collect();
        mapped.sort_unstable();
        self.inner.test(self.relabel[x], self.relabel[y], &mapped)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Answers "dependent" for the first `succeed` calls, then fails.
#[derive(Debug)]
pub struct FailingOracle {
    succeed: usize,
    calls: AtomicUsize,
}

impl FailingOracle {
    pub fn new(succeed: usize) -> Self {
        Self {
            succeed,
            calls: AtomicUsize::new(0),
        }
    }
}

impl IndependenceOracle for FailingOracle {
    fn test(&self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> Result<Decision, OracleError> {
        if self.calls.fetch_add(1, Ordering::Relaxed) >= self.succeed {
            return Err(OracleError::SingularMatrix {
                x,
                y,
                given: given.to_vec(),
            });
        }
        Ok(Decision::Dependent)
    }

    fn name(&self) -> &str {
        "failing"
    }
}
