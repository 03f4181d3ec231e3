use pcalg_causal::graph::dag_enforcement;
use pcalg_causal::{OrientationEngine, PairRelation, PcEngine, SkeletonEstimator};
use pcalg_core::config::{OrientationConfig, SkeletonConfig};
use pcalg_core::{IndependenceOracle, PcConfig, PcError};
use proptest::prelude::*;
use test_fixtures::{DagOracle, HashedOracle, PermutedOracle, TrueDag};

fn relabelled() -> impl Strategy<Value = (usize, Vec<usize>, u64, f64)> {
    (3..8usize).prop_flat_map(|n| {
        (
            Just(n),
            Just((0..n).collect::<Vec<usize>>()).prop_shuffle(),
            any::<u64>(),
            0.2..0.8f64,
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn perfect_oracle_recovers_the_equivalence_class(n in 2..9usize, p in 0.1..0.6f64, seed in any::<u64>()) {
        let dag = TrueDag::random(n, p, seed);
        let output = PcEngine::new(DagOracle::new(dag.clone()), PcConfig::default()).run(n).unwrap();

        prop_assert_eq!(output.skeleton.graph.edges(), dag.skeleton());
        for (from, to) in output.cpdag.directed_edges() {
            prop_assert!(dag.has_edge(from, to), "{} -> {} is not in the true DAG", from, to);
        }
        for (i, k, j) in dag.v_structures() {
            prop_assert_eq!(output.relation(i, k), PairRelation::Forward);
            prop_assert_eq!(output.relation(j, k), PairRelation::Forward);
        }
        prop_assert!(dag_enforcement::find_cycles(&output.cpdag).is_empty());
    }

    #[test]
    fn perfect_oracle_output_is_the_exact_cpdag(n in 3..7usize, p in 0.1..0.6f64, seed in any::<u64>()) {
        let dag = TrueDag::random(n, p, seed);
        let class = dag.markov_equivalence_class();
        let output = PcEngine::new(DagOracle::new(dag.clone()), PcConfig::default()).run(n).unwrap();

        for (i, j) in dag.skeleton() {
            let forward = class.iter().all(|member| member.has_edge(i, j));
            let backward = class.iter().all(|member| member.has_edge(j, i));
            let expected = match (forward, backward) {
                (true, _) => PairRelation::Forward,
                (_, true) => PairRelation::Backward,
                _ => PairRelation::Undirected,
            };
            prop_assert_eq!(output.relation(i, j), expected, "pair ({}, {})", i, j);
        }
    }

    #[test]
    fn skeleton_only_shrinks_and_sepsets_are_sound(n in 2..8usize, rate in 0.1..0.9f64, seed in any::<u64>()) {
        let oracle = HashedOracle::new(seed, rate);
        let skeleton = SkeletonEstimator::new(&oracle, SkeletonConfig::default()).estimate(n).unwrap();

        let mut previous = n * (n - 1) / 2;
        for &edges in &skeleton.stats.edges_after_level {
            prop_assert!(edges <= previous);
            previous = edges;
        }
        for ((i, j), separating) in skeleton.separation_sets.entries() {
            prop_assert!(!skeleton.graph.has_edge(i, j));
            prop_assert!(!separating.contains(i) && !separating.contains(j));
            prop_assert!(separating.len() <= skeleton.stats.max_level);
            prop_assert!(oracle.test(i, j, separating.as_slice()).unwrap().is_independent());
        }
        prop_assert_eq!(skeleton.separation_sets.len() + skeleton.graph.edge_count(), n * (n - 1) / 2);
    }

    #[test]
    fn stable_skeleton_ignores_variable_order((n, relabel, seed, rate) in relabelled()) {
        let base = SkeletonEstimator::new(&HashedOracle::new(seed, rate), SkeletonConfig::default())
            .estimate(n)
            .unwrap();
        let permuted_oracle = PermutedOracle::new(HashedOracle::new(seed, rate), relabel.clone());
        let permuted = SkeletonEstimator::new(&permuted_oracle, SkeletonConfig::default())
            .estimate(n)
            .unwrap();

        let mut mapped: Vec<(usize, usize)> = permuted
            .graph
            .edges()
            .into_iter()
            .map(|(a, b)| {
                let (a, b) = (relabel[a], relabel[b]);
                (a.min(b), a.max(b))
            })
            .collect();
        mapped.sort_unstable();
        prop_assert_eq!(mapped, base.graph.edges());
    }

    #[test]
    fn parallel_and_sequential_agree(n in 2..8usize, rate in 0.1..0.9f64, seed in any::<u64>()) {
        let oracle = HashedOracle::new(seed, rate);
        let sequential = SkeletonEstimator::new(&oracle, SkeletonConfig::default()).estimate(n).unwrap();
        let config = SkeletonConfig { parallel: true, ..SkeletonConfig::default() };
        let parallel = SkeletonEstimator::new(&oracle, config).estimate(n).unwrap();
        prop_assert_eq!(sequential.graph, parallel.graph);
        prop_assert_eq!(sequential.separation_sets.entries(), parallel.separation_sets.entries());
    }

    #[test]
    fn orientation_keeps_adjacency_and_stays_acyclic(n in 2..8usize, rate in 0.1..0.9f64, seed in any::<u64>()) {
        let oracle = HashedOracle::new(seed, rate);
        let skeleton = SkeletonEstimator::new(&oracle, SkeletonConfig::default()).estimate(n).unwrap();
        let engine = OrientationEngine::new(OrientationConfig::default());

        match engine.orient_skeleton(&skeleton) {
            Ok(orientation) => {
                let mut cpdag = orientation.cpdag;
                prop_assert_eq!(&cpdag.skeleton(), &skeleton.graph);
                prop_assert!(dag_enforcement::find_cycles(&cpdag).is_empty());
                for i in 0..n {
                    for j in 0..n {
                        let forward = cpdag.relation(i, j);
                        let backward = cpdag.relation(j, i);
                        let mirrored = match forward {
                            PairRelation::Forward => PairRelation::Backward,
                            PairRelation::Backward => PairRelation::Forward,
                            other => other,
                        };
                        prop_assert_eq!(mirrored, backward);
                    }
                }
                prop_assert_eq!(engine.propagate(&mut cpdag).unwrap().total(), 0);
            }
            // Hashed answers need not be faithful to any DAG.
            Err(_) => {
                let run = PcEngine::new(HashedOracle::new(seed, rate), PcConfig::default()).run(n);
                prop_assert!(matches!(run, Err(PcError::Orientation(_))));
            }
        }
    }
}
