//! Meek's orientation rules, applied to a fixed point.

use pcalg_core::errors::OrientationError;
use pcalg_core::VarIndex;
use serde::Serialize;
use tracing::debug;

use crate::graph::{dag_enforcement, Pdag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MeekRule {
    /// `a -> i - j`, `a` and `j` non-adjacent: orient `i -> j`.
    R1,
    /// `i -> k -> j` and `i - j`: orient `i -> j`.
    R2,
    /// `i - k -> j`, `i - l -> j`, `k` and `l` non-adjacent: orient `i -> j`.
    R3,
    /// `i - k -> l -> j`, `k` and `j` non-adjacent, `i` adjacent to `l`: orient `i -> j`.
    R4,
}

impl std::fmt::Display for MeekRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MeekRule::R1 => "R1",
            MeekRule::R2 => "R2",
            MeekRule::R3 => "R3",
            MeekRule::R4 => "R4",
        };
        f.write_str(name)
    }
}

/// Orientations made by each rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RuleCounts {
    pub rule1: usize,
    pub rule2: usize,
    pub rule3: usize,
    pub rule4: usize,
    /// Full sweeps over all pairs, including the final one that changed nothing.
    pub sweeps: usize,
}

impl RuleCounts {
    pub fn total(&self) -> usize {
        self.rule1 + self.rule2 + self.rule3 + self.rule4
    }

    fn record(&mut self, rule: MeekRule) {
        match rule {
            MeekRule::R1 => self.rule1 += 1,
            MeekRule::R2 => self.rule2 += 1,
            MeekRule::R3 => self.rule3 += 1,
            MeekRule::R4 => self.rule4 += 1,
        }
    }
}

/// Apply the rules until a sweep over all ordered pairs orients nothing.
pub fn propagate(pdag: &mut Pdag, apply_rule4: bool) -> Result<RuleCounts, OrientationError> {
    let n = pdag.num_vertices();
    let mut counts = RuleCounts::default();

    loop {
        counts.sweeps += 1;
        let mut changed = false;
        for i in 0..n {
            for j in 0..n {
                if i == j || !pdag.is_undirected(i, j) {
                    continue;
                }
                let Some(rule) = applicable_rule(pdag, i, j, apply_rule4) else {
                    continue;
                };
                if dag_enforcement::would_create_cycle(pdag, i, j) {
                    return Err(OrientationError::InconsistentOrientation {
                        from: i,
                        to: j,
                        rule: rule.to_string(),
                        details: format!("{j} already reaches {i} along directed edges"),
                    });
                }
                pdag.orient(i, j, &rule.to_string())?;
                counts.record(rule);
                changed = true;
                debug!(from = i, to = j, rule = %rule, "edge oriented");
            }
        }
        if !changed {
            break;
        }
    }

    Ok(counts)
}

/// First rule that compels `i -> j` for the undirected edge `i - j`.
fn applicable_rule(pdag: &Pdag, i: VarIndex, j: VarIndex, apply_rule4: bool) -> Option<MeekRule> {
    if rule1(pdag, i, j) {
        Some(MeekRule::R1)
    } else if rule2(pdag, i, j) {
        Some(MeekRule::R2)
    } else if rule3(pdag, i, j) {
        Some(MeekRule::R3)
    } else if apply_rule4 && rule4(pdag, i, j) {
        Some(MeekRule::R4)
    } else {
        None
    }
}

fn rule1(pdag: &Pdag, i: VarIndex, j: VarIndex) -> bool {
    pdag.parents(i).any(|a| a != j && !pdag.is_adjacent(a, j))
}

fn rule2(pdag: &Pdag, i: VarIndex, j: VarIndex) -> bool {
    pdag.children(i).any(|k| pdag.is_directed(k, j))
}

fn rule3(pdag: &Pdag, i: VarIndex, j: VarIndex) -> bool {
    let mids: Vec<VarIndex> = pdag
        .undirected_neighbors(i)
        .filter(|&k| k != j && pdag.is_directed(k, j))
        .collect();
    mids.iter().enumerate().any(|(pos, &k)| {
        mids[pos + 1..]
            .iter()
            .any(|&l| !pdag.is_adjacent(k, l))
    })
}

fn rule4(pdag: &Pdag, i: VarIndex, j: VarIndex) -> bool {
    pdag.undirected_neighbors(i)
        .filter(|&k| k != j && !pdag.is_adjacent(k, j))
        .any(|k| {
            pdag.children(k)
                .any(|l| l != i && pdag.is_directed(l, j) && pdag.is_adjacent(i, l))
        })
}
