use pcalg_causal::{AdjacencyGraph, SkeletonEstimator};
use pcalg_core::config::{SkeletonConfig, SkeletonMethod};
use pcalg_core::errors::{GraphError, OracleError};
use pcalg_core::{Cancellable, CancellationToken, ConditioningSet, PcError};
use test_fixtures::{DagOracle, FailingOracle, ScriptedOracle, TrueDag};

fn stable() -> SkeletonConfig {
    SkeletonConfig::default()
}

fn original() -> SkeletonConfig {
    SkeletonConfig {
        method: SkeletonMethod::Original,
        ..SkeletonConfig::default()
    }
}

fn set(vars: &[usize]) -> ConditioningSet {
    ConditioningSet::from_slice(vars)
}

fn all_independent(n: usize) -> ScriptedOracle {
    let mut oracle = ScriptedOracle::new();
    for i in 0..n {
        for j in i + 1..n {
            oracle = oracle.independent(i, j, &[]);
        }
    }
    oracle
}

#[test]
fn chain_is_separated_by_its_middle_vertex() {
    let oracle = ScriptedOracle::new().independent(0, 2, &[1]);
    let skeleton = SkeletonEstimator::new(&oracle, stable()).estimate(3).unwrap();

    assert_eq!(skeleton.graph.edges(), vec![(0, 1), (1, 2)]);
    assert_eq!(skeleton.separation_sets.get(2, 0), Some(&set(&[1])));
    assert_eq!(skeleton.separation_sets.len(), 1);
    // Level 0: one query per edge. Level 1: one per edge, since both sides
    // offer the same candidate.
    assert_eq!(skeleton.stats.tests_performed, 6);
    assert_eq!(skeleton.stats.edges_after_level, vec![3, 2]);
    assert_eq!(skeleton.stats.max_level, 1);
    assert_eq!(skeleton.stats.edges_removed, 1);
    assert_eq!(oracle.call_count(), 6);
}

#[test]
fn marginal_independence_records_an_empty_separation_set() {
    let oracle = ScriptedOracle::new().independent(0, 2, &[]);
    let skeleton = SkeletonEstimator::new(&oracle, stable()).estimate(3).unwrap();

    assert_eq!(skeleton.graph.edges(), vec![(0, 1), (1, 2)]);
    assert_eq!(skeleton.separation_sets.get(0, 2), Some(&ConditioningSet::new()));
}

#[test]
fn full_independence_empties_the_graph_at_level_zero() {
    let oracle = all_independent(4);
    let skeleton = SkeletonEstimator::new(&oracle, stable()).estimate(4).unwrap();

    assert_eq!(skeleton.graph.edge_count(), 0);
    assert_eq!(skeleton.separation_sets.len(), 6);
    assert!(skeleton.separation_sets.entries().iter().all(|(_, s)| s.is_empty()));
    assert_eq!(skeleton.stats.tests_performed, 6);
    assert_eq!(skeleton.stats.edges_after_level, vec![0]);
}

#[test]
fn fewer_than_two_variables_needs_no_tests() {
    let oracle = ScriptedOracle::new();
    for n in [0, 1] {
        let skeleton = SkeletonEstimator::new(&oracle, stable()).estimate(n).unwrap();
        assert_eq!(skeleton.graph.num_vertices(), n);
        assert_eq!(skeleton.graph.edge_count(), 0);
        assert!(skeleton.separation_sets.is_empty());
    }
    assert_eq!(oracle.call_count(), 0);
}

#[test]
fn first_separating_subset_in_lexicographic_order_wins() {
    let oracle = ScriptedOracle::new()
        .independent(0, 3, &[2])
        .independent(0, 3, &[1]);
    let skeleton = SkeletonEstimator::new(&oracle, stable()).estimate(4).unwrap();
    assert_eq!(skeleton.separation_sets.get(0, 3), Some(&set(&[1])));
}

#[test]
fn fixed_edges_are_never_tested_or_removed() {
    let oracle = all_independent(3);
    let skeleton = SkeletonEstimator::new(&oracle, stable())
        .with_fixed_edges([(1, 0)])
        .estimate(3)
        .unwrap();

    assert_eq!(skeleton.graph.edges(), vec![(0, 1)]);
    assert!(!skeleton.separation_sets.contains(0, 1));
    assert_eq!(oracle.call_count(), 2);
}

#[test]
fn fixed_edges_must_exist_in_the_starting_graph() {
    let oracle = ScriptedOracle::new();
    let result = SkeletonEstimator::new(&oracle, stable())
        .with_initial_graph(AdjacencyGraph::empty(3))
        .with_fixed_edges([(0, 1)])
        .estimate(3);
    assert!(matches!(
        result,
        Err(PcError::Graph(GraphError::InvalidEdge { i: 0, j: 1 }))
    ));

    let result = SkeletonEstimator::new(&oracle, stable())
        .with_fixed_edges([(0, 5)])
        .estimate(3);
    assert!(matches!(
        result,
        Err(PcError::Graph(GraphError::VertexOutOfRange { vertex: 5, n: 3 }))
    ));
}

#[test]
fn initial_graph_restricts_the_search() {
    let oracle = DagOracle::new(TrueDag::from_edges(3, &[(0, 1), (1, 2)]));
    let initial = AdjacencyGraph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
    let skeleton = SkeletonEstimator::new(&oracle, stable())
        .with_initial_graph(initial)
        .estimate(3)
        .unwrap();

    assert_eq!(skeleton.graph.edges(), vec![(0, 1), (1, 2)]);
    assert!(skeleton.separation_sets.is_empty());
    assert!(oracle.calls().iter().all(|(x, y, _)| (x.min(y), x.max(y)) != (&0, &2)));
}

#[test]
fn initial_graph_must_match_variable_count() {
    let oracle = ScriptedOracle::new();
    let result = SkeletonEstimator::new(&oracle, stable())
        .with_initial_graph(AdjacencyGraph::complete(4))
        .estimate(3);
    assert!(matches!(
        result,
        Err(PcError::Graph(GraphError::VertexCountMismatch {
            expected: 3,
            actual: 4
        }))
    ));
}

#[test]
fn max_level_stops_the_search_early() {
    let oracle = ScriptedOracle::new().independent(0, 2, &[1]);
    let config = SkeletonConfig {
        max_level: Some(0),
        ..stable()
    };
    let skeleton = SkeletonEstimator::new(&oracle, config).estimate(3).unwrap();
    assert_eq!(skeleton.graph.edge_count(), 3);
    assert_eq!(skeleton.stats.max_level, 0);
    assert_eq!(skeleton.stats.tests_performed, 3);
}

#[test]
fn test_budget_aborts_the_run() {
    let oracle = ScriptedOracle::new();
    let config = SkeletonConfig {
        max_tests: Some(2),
        ..stable()
    };
    let result = SkeletonEstimator::new(&oracle, config).estimate(4);
    assert!(matches!(result, Err(PcError::BudgetExhausted { limit: 2 })));
    assert_eq!(oracle.call_count(), 2);
}

#[test]
fn cancelled_token_stops_before_any_test() {
    let oracle = ScriptedOracle::new();
    let token = CancellationToken::new();
    token.cancel();
    let result = SkeletonEstimator::new(&oracle, stable())
        .with_cancellation(token)
        .estimate(5);
    assert!(matches!(result, Err(PcError::Cancelled)));
    assert_eq!(oracle.call_count(), 0);
}

#[test]
fn oracle_failure_aborts_the_run() {
    let oracle = FailingOracle::new(3);
    for config in [stable(), original()] {
        let result = SkeletonEstimator::new(&oracle, config).estimate(4);
        assert!(matches!(
            result,
            Err(PcError::Oracle(OracleError::SingularMatrix { .. }))
        ));
    }
}

#[test]
fn perfect_oracle_recovers_the_true_skeleton() {
    for seed in 0..10 {
        let dag = TrueDag::random(8, 0.3, seed);
        let oracle = DagOracle::new(dag.clone());
        for config in [stable(), original()] {
            let skeleton = SkeletonEstimator::new(&oracle, config).estimate(8).unwrap();
            assert_eq!(skeleton.graph.edges(), dag.skeleton(), "seed {seed}");
            for ((i, j), separating) in skeleton.separation_sets.entries() {
                assert!(dag.d_separated(i, j, separating.as_slice()));
            }
        }
    }
}

#[test]
fn parallel_stable_search_matches_sequential() {
    for seed in 0..5 {
        let oracle = DagOracle::new(TrueDag::random(10, 0.25, seed));
        let sequential = SkeletonEstimator::new(&oracle, stable()).estimate(10).unwrap();
        let config = SkeletonConfig {
            parallel: true,
            ..stable()
        };
        let parallel = SkeletonEstimator::new(&oracle, config).estimate(10).unwrap();

        assert_eq!(sequential.graph.edges(), parallel.graph.edges());
        assert_eq!(
            sequential.separation_sets.entries(),
            parallel.separation_sets.entries()
        );
        assert_eq!(sequential.stats, parallel.stats);
    }
}

#[test]
fn original_variant_tests_both_ordered_pairs() {
    let oracle = ScriptedOracle::new().independent(0, 2, &[1]);
    let skeleton = SkeletonEstimator::new(&oracle, original()).estimate(3).unwrap();
    assert_eq!(skeleton.graph.edges(), vec![(0, 1), (1, 2)]);
    assert_eq!(skeleton.separation_sets.get(0, 2), Some(&set(&[1])));
    assert!(oracle.call_count() > 6);
}

#[test]
fn level_zero_queries_each_edge_once_with_the_empty_set() {
    let dag = TrueDag::from_edges(3, &[(0, 1), (0, 2), (1, 2)]);
    let oracle = DagOracle::new(dag);
    let skeleton = SkeletonEstimator::new(&oracle, stable()).estimate(3).unwrap();

    assert_eq!(skeleton.graph.edge_count(), 3);
    let mut marginal: Vec<(usize, usize)> = oracle
        .calls()
        .into_iter()
        .filter(|(_, _, given)| given.is_empty())
        .map(|(x, y, _)| (x.min(y), x.max(y)))
        .collect();
    marginal.sort_unstable();
    assert_eq!(marginal, vec![(0, 1), (0, 2), (1, 2)]);
    assert_eq!(skeleton.stats.tests_performed, 6);
}

#[test]
fn original_variant_removes_marginally_independent_pairs_at_level_zero() {
    let oracle = all_independent(3);
    let skeleton = SkeletonEstimator::new(&oracle, original()).estimate(3).unwrap();

    assert_eq!(skeleton.graph.edge_count(), 0);
    assert_eq!(skeleton.separation_sets.get(1, 2), Some(&ConditioningSet::new()));
    assert_eq!(oracle.call_count(), 3);
}
