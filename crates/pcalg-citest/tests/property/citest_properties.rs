use pcalg_citest::{DataMatrix, DiscreteGSquareTest, DiscreteMatrix, FisherZTest};
use proptest::prelude::*;
use test_fixtures::sampling::{discrete, linear_gaussian};
use test_fixtures::TrueDag;

fn pair_and_given(n: usize) -> impl Strategy<Value = (usize, usize, Vec<usize>)> {
    (0..n, 0..n, proptest::collection::vec(0..n, 0..3)).prop_filter_map(
        "distinct variables",
        |(x, y, mut given)| {
            given.sort_unstable();
            given.dedup();
            (x != y && !given.contains(&x) && !given.contains(&y)).then_some((x, y, given))
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fisher_z_p_values_are_probabilities_and_symmetric(
        seed in 0u64..1000,
        (x, y, given) in pair_and_given(5),
    ) {
        let dag = TrueDag::random(5, 0.4, seed);
        let data = DataMatrix::from_rows(linear_gaussian(&dag, 200, seed)).unwrap();
        let test = FisherZTest::with_default_alpha(&data).unwrap();

        let forward = test.p_value(x, y, &given).unwrap();
        let backward = test.p_value(y, x, &given).unwrap();
        prop_assert!((0.0..=1.0).contains(&forward));
        prop_assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn discrete_g_square_p_values_are_probabilities_and_symmetric(
        seed in 0u64..1000,
        (x, y, given) in pair_and_given(4),
    ) {
        let dag = TrueDag::random(4, 0.5, seed);
        let rows = discrete(&dag, &[2, 3, 2, 3], 400, 0.6, seed);
        let data = DiscreteMatrix::from_rows(rows).unwrap();
        let test = DiscreteGSquareTest::new(&data, &[2, 3, 2, 3], 0.05).unwrap();

        let forward = test.p_value(x, y, &given).unwrap();
        let backward = test.p_value(y, x, &given).unwrap();
        prop_assert!((0.0..=1.0).contains(&forward));
        prop_assert!((forward - backward).abs() < 1e-9);
    }
}
