//! V-structure detection on unshielded triples.

use pcalg_core::errors::OrientationError;
use pcalg_core::VarIndex;
use tracing::debug;

use crate::graph::{dag_enforcement, AdjacencyGraph, PairRelation, Pdag, SeparationSets};

/// Orient `i -> k <- j` for every unshielded triple `i - k - j` whose
/// separation set excludes `k`. Returns the number of colliders found.
///
/// Pairs without a separation set (never tested because they were absent from
/// the starting graph) are skipped.
pub fn orient_colliders(
    pdag: &mut Pdag,
    skeleton: &AdjacencyGraph,
    separation_sets: &SeparationSets,
) -> Result<usize, OrientationError> {
    let n = skeleton.num_vertices();
    let mut colliders = 0;

    for i in 0..n {
        for j in i + 1..n {
            if skeleton.has_edge(i, j) {
                continue;
            }
            let Some(separating) = separation_sets.get(i, j) else {
                continue;
            };
            let common: Vec<VarIndex> = skeleton
                .neighbors(i)
                .intersection(skeleton.neighbors(j))
                .copied()
                .collect();
            for k in common {
                if separating.contains(k) {
                    continue;
                }
                orient_into(pdag, i, k, j)?;
                orient_into(pdag, j, k, i)?;
                colliders += 1;
                debug!(i, k, j, separation_set = %separating, "collider oriented");
            }
        }
    }

    if let Some(cycle) = dag_enforcement::find_cycles(pdag).into_iter().next() {
        return Err(OrientationError::InconsistentSeparation {
            collider: cycle[0],
            details: format!("colliders form a directed cycle through {cycle:?}"),
        });
    }

    Ok(colliders)
}

/// Orient `from -> collider`, where `other -> collider` is the partner arc.
fn orient_into(
    pdag: &mut Pdag,
    from: VarIndex,
    collider: VarIndex,
    other: VarIndex,
) -> Result<(), OrientationError> {
    if pdag.relation(from, collider) == PairRelation::Backward {
        return Err(OrientationError::InconsistentSeparation {
            collider,
            details: format!(
                "collider {from} -> {collider} <- {other} conflicts with {collider} -> {from} \
                 from another collider"
            ),
        });
    }
    pdag.orient(from, collider, "collider")?;
    Ok(())
}
